//! Fixed-capacity bit map
//!
//! Keys in `[0, capacity]` map to one bit each. The bound is inclusive for
//! both [`BitMap::add`] and [`BitMap::has`]: `capacity` itself is a valid key,
//! and anything above it is rejected with `OutOfRange` by either operation.

use crate::storage::Words;
use crate::{BitMapError, Capacity, Plan, Result, Word, WordWidth};

/// Word buffer of the width picked at construction
#[derive(Debug, Clone, PartialEq, Eq)]
enum Storage {
    Narrow(Words<u32>),
    Wide(Words<u64>),
}

/// Set of integer keys in `[0, capacity]`, one bit per key
///
/// The storage width is 32 bits while every key fits in a `u32` and 64 bits
/// above that. Neither the capacity nor the width ever change after
/// construction, and bits are only ever set, never cleared.
///
/// # Examples
///
/// ```
/// use bitmap_core::{BitMap, WordWidth};
///
/// let mut map = BitMap::new(10)?;
/// map.add(3)?;
/// map.add(7)?;
///
/// assert_eq!(map.word_width(), WordWidth::W32);
/// assert!(map.has(3)?);
/// assert!(!map.has(4)?);
/// assert_eq!(map.get(0)?, 136);
/// # Ok::<(), bitmap_core::BitMapError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMap {
    capacity: u64,
    storage: Storage,
}

/// Split a key into its word index and bit offset for words of type `W`
///
/// The index is only meaningful for keys already checked against the
/// capacity. Every `Plan` sizes its buffer to `capacity / bits + 1` words, so
/// such an index is always inside the buffer.
#[inline]
fn locate<W: Word>(value: u64) -> (usize, u32) {
    let bits = u64::from(W::WIDTH.bits());
    ((value / bits) as usize, (value % bits) as u32)
}

#[inline]
fn set_bit<W: Word>(words: &mut Words<W>, value: u64) {
    let (index, offset) = locate::<W>(value);
    words.or_assign(index, W::mask(offset));
}

#[inline]
fn test_bit<W: Word>(words: &Words<W>, value: u64) -> bool {
    let (index, offset) = locate::<W>(value);
    words
        .word(index)
        .is_some_and(|word| word & W::mask(offset) != W::ZERO)
}

impl BitMap {
    /// Create an empty bit map accepting keys in `[0, max]`
    pub fn new(max: u64) -> Result<Self> {
        Self::from_plan(Plan::for_capacity(max)?)
    }

    /// Create an empty bit map from a validated capacity
    pub fn with_capacity(capacity: Capacity) -> Result<Self> {
        Self::new(capacity.get())
    }

    /// Allocate the buffer described by `plan`
    ///
    /// Plans only come from [`Plan::for_capacity`], so the buffer always covers
    /// every key in `[0, plan.capacity()]`.
    pub fn from_plan(plan: Plan) -> Result<Self> {
        let storage = match plan.word_width() {
            WordWidth::W32 => Words::zeroed(plan.word_count()).map(Storage::Narrow),
            WordWidth::W64 => Words::zeroed(plan.word_count()).map(Storage::Wide),
        };

        let storage = match storage {
            Ok(storage) => storage,
            Err(err) => {
                tracing::warn!(
                    capacity = plan.capacity(),
                    byte_size = plan.byte_size(),
                    "bit map allocation failed"
                );
                return Err(err);
            }
        };

        tracing::debug!(
            capacity = plan.capacity(),
            word_bits = plan.word_width().bits(),
            word_count = plan.word_count(),
            "allocated bit map"
        );

        Ok(Self {
            capacity: plan.capacity(),
            storage,
        })
    }

    /// Largest key the map accepts, inclusive
    #[inline]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Width of the storage words
    #[inline]
    pub fn word_width(&self) -> WordWidth {
        match self.storage {
            Storage::Narrow(_) => WordWidth::W32,
            Storage::Wide(_) => WordWidth::W64,
        }
    }

    /// Number of storage words
    #[inline]
    pub fn word_count(&self) -> usize {
        match &self.storage {
            Storage::Narrow(words) => words.len(),
            Storage::Wide(words) => words.len(),
        }
    }

    fn check_key(&self, value: u64) -> Result<()> {
        if value > self.capacity {
            tracing::trace!(value, capacity = self.capacity, "key rejected");
            return Err(BitMapError::OutOfRange {
                value,
                limit: self.capacity,
            });
        }
        Ok(())
    }

    /// Record `value` as a member
    ///
    /// Adding a key twice has no further effect. Keys above the capacity fail
    /// with `OutOfRange` and leave the map untouched.
    pub fn add(&mut self, value: u64) -> Result<()> {
        self.check_key(value)?;
        match &mut self.storage {
            Storage::Narrow(words) => set_bit(words, value),
            Storage::Wide(words) => set_bit(words, value),
        }
        Ok(())
    }

    /// Whether `value` has been added
    ///
    /// Applies the same inclusive bound as [`BitMap::add`].
    pub fn has(&self, value: u64) -> Result<bool> {
        self.check_key(value)?;
        Ok(match &self.storage {
            Storage::Narrow(words) => test_bit(words, value),
            Storage::Wide(words) => test_bit(words, value),
        })
    }

    /// Raw storage word at `word_index`, widened to `u64`
    ///
    /// Bit `b` of word `i` is key `i * word_width + b`. Indices at or past
    /// [`BitMap::word_count`] fail with `OutOfRange`.
    pub fn get(&self, word_index: u64) -> Result<u64> {
        let word = usize::try_from(word_index)
            .ok()
            .and_then(|index| match &self.storage {
                Storage::Narrow(words) => words.word(index).map(Word::to_u64),
                Storage::Wide(words) => words.word(index).map(Word::to_u64),
            });

        word.ok_or(BitMapError::OutOfRange {
            value: word_index,
            limit: self.word_count() as u64,
        })
    }

    /// All storage words as native-endian bytes
    pub fn as_bytes(&self) -> &[u8] {
        match &self.storage {
            Storage::Narrow(words) => words.as_bytes(),
            Storage::Wide(words) => words.as_bytes(),
        }
    }

    /// Storage words, if the map uses 32-bit words
    pub fn words_u32(&self) -> Option<&[u32]> {
        match &self.storage {
            Storage::Narrow(words) => Some(words.as_slice()),
            Storage::Wide(_) => None,
        }
    }

    /// Storage words, if the map uses 64-bit words
    pub fn words_u64(&self) -> Option<&[u64]> {
        match &self.storage {
            Storage::Narrow(_) => None,
            Storage::Wide(words) => Some(words.as_slice()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_basic() {
        let mut map = BitMap::new(10).unwrap();

        map.add(3).unwrap();
        map.add(7).unwrap();
        map.add(3).unwrap();

        assert_eq!(map.word_count(), 1);
        assert!(map.has(3).unwrap());
        assert!(map.has(7).unwrap());
        assert!(!map.has(4).unwrap());
        assert_eq!(map.get(0), Ok(136));
    }

    #[test]
    fn test_capacity_is_inclusive() {
        let mut map = BitMap::new(10).unwrap();
        assert_eq!(map.has(10), Ok(false));
        assert_eq!(map.add(10), Ok(()));
        assert_eq!(map.has(10), Ok(true));

        let out = BitMapError::OutOfRange {
            value: 11,
            limit: 10,
        };
        assert_eq!(map.add(11), Err(out));
        assert_eq!(map.has(11), Err(out));
    }

    #[test]
    fn test_rejected_add_mutates_nothing() {
        let mut map = BitMap::new(40).unwrap();
        map.add(33).unwrap();
        let before = map.clone();

        assert!(map.add(41).is_err());
        assert!(map.add(u64::MAX).is_err());
        assert_eq!(map, before);
    }

    #[test]
    fn test_zero_capacity() {
        let mut map = BitMap::new(0).unwrap();
        assert_eq!(map.word_count(), 1);
        assert_eq!(map.has(0), Ok(false));
        map.add(0).unwrap();
        assert_eq!(map.has(0), Ok(true));
        assert_eq!(map.get(0), Ok(1));
        assert!(map.add(1).is_err());
    }

    #[test]
    fn test_word_boundaries() {
        let mut map = BitMap::new(100).unwrap();
        assert_eq!(map.word_width(), WordWidth::W32);
        assert_eq!(map.word_count(), 4);

        map.add(31).unwrap();
        map.add(32).unwrap();
        map.add(100).unwrap();

        assert_eq!(map.get(0), Ok(1 << 31));
        assert_eq!(map.get(1), Ok(1));
        assert_eq!(map.get(2), Ok(0));
        assert_eq!(map.get(3), Ok(1 << 4));
        assert_eq!(
            map.get(4),
            Err(BitMapError::OutOfRange { value: 4, limit: 4 })
        );
        assert!(map.get(u64::MAX).is_err());
    }

    #[test]
    fn test_typed_views() {
        let mut map = BitMap::new(64).unwrap();
        map.add(0).unwrap();
        map.add(33).unwrap();

        assert_eq!(map.words_u32(), Some(&[1u32, 2, 0][..]));
        assert_eq!(map.words_u64(), None);
        assert_eq!(map.as_bytes().len(), 12);
        assert_eq!(map.as_bytes()[..4], 1u32.to_ne_bytes());
    }

    #[test]
    fn test_wide_map() {
        let max = 1u64 << 33;
        let mut map = BitMap::new(max).unwrap();
        assert_eq!(map.word_width(), WordWidth::W64);
        assert_eq!(map.capacity(), max);
        assert_eq!(map.word_count(), (1 << 27) + 1);

        map.add(max).unwrap();
        map.add(63).unwrap();
        assert!(map.has(max).unwrap());
        assert!(!map.has(max - 1).unwrap());

        // Offsets above 31 must not be truncated by a narrow shift
        assert_eq!(map.get(0), Ok(1 << 63));
        assert_eq!(map.get(1 << 27), Ok(1));
        assert!(map.words_u32().is_none());
    }

    #[test]
    fn test_plan_covers_every_key() {
        for max in [0u64, 1, 31, 32, 63, 64, 500, 1000, 1023, 1024] {
            let plan = Plan::for_capacity(max).unwrap();
            let mut map = BitMap::from_plan(plan).unwrap();
            assert_eq!(map.word_count(), plan.word_count());
            assert_eq!(map.word_width(), plan.word_width());

            map.add(max).unwrap();
            map.add(max / 2).unwrap();
            assert_eq!(map.has(max), Ok(true), "max {max}");
            assert_eq!(map.has(max / 2), Ok(true), "max {max}");

            let last = map.word_count() as u64 - 1;
            assert_ne!(map.get(last), Ok(0), "max {max}");
        }
    }

    #[test]
    fn test_with_capacity() {
        let map = BitMap::with_capacity(Capacity::new(3000)).unwrap();
        assert_eq!(map.capacity(), 3000);
        assert_eq!(map.word_count(), 94);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_allocation_failure() {
        assert!(matches!(
            BitMap::new(u64::MAX),
            Err(BitMapError::AllocationFailure { word_bytes: 8, .. })
        ));
    }
}
