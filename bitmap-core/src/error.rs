//! Error types for bit map operations

use thiserror::Error;

/// Errors that can occur while planning, building or accessing a bit map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BitMapError {
    /// Construction input was negative, out of range or not a number
    #[error("invalid capacity argument")]
    InvalidArgument,
    /// The backing buffer could not be sized or allocated
    #[error("cannot allocate {word_count} words of {word_bytes} bytes")]
    AllocationFailure { word_count: u64, word_bytes: usize },
    /// A key or word index fell outside the map
    ///
    /// For keys `limit` is the inclusive capacity; for word indices it is the
    /// word count.
    #[error("{value} is out of range (limit {limit})")]
    OutOfRange { value: u64, limit: u64 },
}

/// Broad error classes, for callers that only branch on the kind of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input at construction time
    Input,
    /// Memory could not be obtained
    Resource,
    /// Access outside the representable range
    Bounds,
}

impl BitMapError {
    /// Get the category this error belongs to
    pub const fn category(&self) -> ErrorCategory {
        match self {
            BitMapError::InvalidArgument => ErrorCategory::Input,
            BitMapError::AllocationFailure { .. } => ErrorCategory::Resource,
            BitMapError::OutOfRange { .. } => ErrorCategory::Bounds,
        }
    }
}

/// Result type for bit map operations
pub type Result<T> = core::result::Result<T, BitMapError>;
