//! Storage word constraints
//!
//! This module defines the trait that constrains what integer types can back
//! a bit map. Every mask is built from the word's own `ONE`, so a shift is
//! always evaluated at the storage width.

use core::fmt::Debug;
use core::ops::{BitAnd, BitOr, Shl};

use crate::plan::WordWidth;

/// Trait for unsigned integers that can be used as bit map storage words
///
/// Implementors must be plain data (`bytemuck::Pod`) so that a word buffer can
/// be exported as raw bytes without copying.
pub trait Word:
    bytemuck::Pod
    + Debug
    + Eq
    + BitOr<Output = Self>
    + BitAnd<Output = Self>
    + Shl<u32, Output = Self>
{
    /// The width tag corresponding to this type
    const WIDTH: WordWidth;

    /// All bits cleared
    const ZERO: Self;

    /// Only the lowest bit set
    const ONE: Self;

    /// Mask with only `offset` set
    ///
    /// `offset` must be below the word's bit count.
    #[inline]
    fn mask(offset: u32) -> Self {
        debug_assert!(offset < Self::WIDTH.bits());
        Self::ONE << offset
    }

    /// Widen to `u64` for width-independent callers
    fn to_u64(self) -> u64;
}

impl Word for u32 {
    const WIDTH: WordWidth = WordWidth::W32;
    const ZERO: Self = 0;
    const ONE: Self = 1;

    #[inline]
    fn to_u64(self) -> u64 {
        u64::from(self)
    }
}

impl Word for u64 {
    const WIDTH: WordWidth = WordWidth::W64;
    const ZERO: Self = 0;
    const ONE: Self = 1;

    #[inline]
    fn to_u64(self) -> u64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_uses_word_width() {
        assert_eq!(<u32 as Word>::mask(31), 0x8000_0000);
        assert_eq!(<u64 as Word>::mask(63), 0x8000_0000_0000_0000);
        assert_eq!(<u64 as Word>::mask(40), 1u64 << 40);
    }

    #[test]
    fn test_width_matches_size() {
        assert_eq!(<u32 as Word>::WIDTH.bytes(), core::mem::size_of::<u32>());
        assert_eq!(<u64 as Word>::WIDTH.bytes(), core::mem::size_of::<u64>());
    }
}
