//! Owned word buffers
//!
//! The buffer is requested from the allocator already zeroed, so large maps do
//! not touch their pages until a bit is set, and an allocator refusal is
//! reported as an error instead of aborting the process.

use alloc::alloc::{alloc_zeroed, Layout};
use alloc::boxed::Box;
use core::ptr::{slice_from_raw_parts_mut, NonNull};

use crate::{BitMapError, Result, Word};

/// Fixed-length, zero-initialized buffer of storage words
///
/// There is no way to grow or shrink the buffer; it is released once when the
/// owner is dropped. The buffer always holds at least one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Words<W: Word> {
    buf: Box<[W]>,
}

impl<W: Word> Words<W> {
    /// Allocate `word_count` zeroed words
    ///
    /// A zero count is refused with `AllocationFailure`.
    pub fn zeroed(word_count: usize) -> Result<Self> {
        let failure = BitMapError::AllocationFailure {
            word_count: word_count as u64,
            word_bytes: W::WIDTH.bytes(),
        };

        if word_count == 0 {
            return Err(failure);
        }

        let layout = Layout::array::<W>(word_count).map_err(|_| failure)?;

        // SAFETY: layout has non-zero size because word_count > 0 and W is not
        // zero-sized
        let ptr = unsafe { alloc_zeroed(layout) } as *mut W;
        let ptr = NonNull::new(ptr).ok_or(failure)?;

        // SAFETY:
        // 1. ptr was allocated by the global allocator with Layout::array::<W>(word_count),
        //    which is the layout Box<[W]> uses to free it
        // 2. All bytes are zero, which is a valid W because W: Pod
        // 3. Ownership moves into the box; nothing else holds ptr
        let buf = unsafe { Box::from_raw(slice_from_raw_parts_mut(ptr.as_ptr(), word_count)) };

        Ok(Self { buf })
    }

    /// Number of words in the buffer
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Word at `index`, if present
    #[inline]
    pub fn word(&self, index: usize) -> Option<W> {
        self.buf.get(index).copied()
    }

    /// OR `mask` into the word at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn or_assign(&mut self, index: usize, mask: W) {
        let word = &mut self.buf[index];
        *word = *word | mask;
    }

    /// Typed view of all words
    #[inline]
    pub fn as_slice(&self) -> &[W] {
        &self.buf
    }

    /// Raw native-endian bytes of all words
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.buf)
    }
}
