//! Bit map construction settings
//!
//! Bundles a capacity with an optional memory ceiling so callers can refuse
//! oversized maps before the allocator is involved.

use bitmap_core::{BitMap, BitMapError, Capacity, Plan};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bit map configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    BitMap(#[from] BitMapError),
}

/// Configuration for building a bit map
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct BitMapConfig {
    /// Largest key the map must accept, inclusive
    pub capacity: Capacity,
    /// Refuse plans whose buffer exceeds this many bytes
    pub memory_limit_bytes: Option<usize>,
}

impl BitMapConfig {
    /// Create config for keys in `[0, max]`
    pub fn with_capacity(max: u64) -> Self {
        Self {
            capacity: Capacity::new(max),
            memory_limit_bytes: None,
        }
    }

    /// Set the memory ceiling in bytes
    pub fn with_memory_limit_bytes(mut self, limit: usize) -> Self {
        self.memory_limit_bytes = Some(limit);
        self
    }

    /// Parse a JSON configuration such as `{"capacity": 3000}`
    ///
    /// The result is planned once so that a configuration which could never
    /// be built is rejected at load time.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.plan()?;
        Ok(config)
    }

    /// Plan the map's buffer and check it against the memory ceiling
    pub fn plan(&self) -> bitmap_core::Result<Plan> {
        let plan = Plan::for_capacity(self.capacity.get())?;

        if let Some(limit) = self.memory_limit_bytes {
            if plan.byte_size() > limit {
                tracing::warn!(
                    capacity = plan.capacity(),
                    byte_size = plan.byte_size(),
                    limit,
                    "bit map exceeds memory limit"
                );
                return Err(BitMapError::AllocationFailure {
                    word_count: plan.word_count() as u64,
                    word_bytes: plan.word_width().bytes(),
                });
            }
        }

        Ok(plan)
    }

    /// Build an empty bit map
    pub fn build(&self) -> bitmap_core::Result<BitMap> {
        BitMap::from_plan(self.plan()?)
    }
}

impl Default for BitMapConfig {
    fn default() -> Self {
        Self::with_capacity(u64::from(u32::MAX))
    }
}
