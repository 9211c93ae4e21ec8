//! Capacity planning for bit maps
//!
//! Translates a requested maximum key into a storage word width and a word
//! count, and checks that the resulting buffer size is addressable before any
//! memory is requested.

use crate::{BitMapError, Result};

/// Bit width of the storage words backing a bit map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordWidth {
    /// 32-bit words, used while every key fits in a `u32`
    W32,
    /// 64-bit words, used once the capacity exceeds `u32::MAX`
    W64,
}

impl WordWidth {
    /// Select the word width for an inclusive capacity
    pub const fn for_capacity(max: u64) -> Self {
        if max > u32::MAX as u64 {
            WordWidth::W64
        } else {
            WordWidth::W32
        }
    }

    /// Number of bits per word
    pub const fn bits(self) -> u32 {
        match self {
            WordWidth::W32 => 32,
            WordWidth::W64 => 64,
        }
    }

    /// Number of bytes per word
    pub const fn bytes(self) -> usize {
        match self {
            WordWidth::W32 => 4,
            WordWidth::W64 => 8,
        }
    }
}

/// Checked layout of a bit map's backing buffer
///
/// A plan is pure arithmetic: building one never allocates, so callers can
/// inspect `byte_size` before committing to a capacity. The only way to get a
/// plan is [`Plan::for_capacity`], so its width and word count always cover
/// every key up to its capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Plan {
    capacity: u64,
    word_width: WordWidth,
    word_count: usize,
    byte_size: usize,
}

impl Plan {
    /// Plan the buffer for keys in `[0, max]`
    ///
    /// Fails with `AllocationFailure` when the word count does not fit the
    /// address space or the byte size would overflow `isize::MAX`.
    pub fn for_capacity(max: u64) -> Result<Self> {
        let word_width = WordWidth::for_capacity(max);
        let words = max / u64::from(word_width.bits()) + 1;

        let overflow = BitMapError::AllocationFailure {
            word_count: words,
            word_bytes: word_width.bytes(),
        };

        let word_count = usize::try_from(words).map_err(|_| overflow)?;

        // Allocations are limited to isize::MAX bytes
        let byte_size = word_count
            .checked_mul(word_width.bytes())
            .filter(|&size| size <= isize::MAX as usize)
            .ok_or(overflow)?;

        Ok(Self {
            capacity: max,
            word_width,
            word_count,
            byte_size,
        })
    }

    /// Largest representable key, inclusive
    pub const fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Width of every storage word
    pub const fn word_width(&self) -> WordWidth {
        self.word_width
    }

    /// Number of storage words, `capacity / bits + 1`
    pub const fn word_count(&self) -> usize {
        self.word_count
    }

    /// Total buffer size in bytes
    pub const fn byte_size(&self) -> usize {
        self.byte_size
    }
}
