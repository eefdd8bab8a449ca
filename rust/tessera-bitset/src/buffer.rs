//! Owned word storage with a bit length kept separate from the word
//! capacity.
//!
//! `WordBuffer` is the single owner of a raw block obtained from
//! `tessera-word-alloc`. It tracks `capacity` in words and `len` in bits;
//! `capacity >= len.div_ceil(64)` at all times. The words in
//! `[0, word_count())` are always initialized and are the only ones a slice
//! ever covers; the slack up to `capacity` stays out of reach until a
//! growth path initializes it.
//!
//! Growth policies live here: doubling for `push_back`
//! ([`WordBuffer::grow_for_push`]) and the looser `new words + old
//! capacity` estimate used by left shifts and assignment, which trades
//! over-allocation for fewer reallocations.

use std::ptr::NonNull;

use tessera_word_alloc::{self as word_alloc, AllocError};

use crate::word::{self, Word, WORD_BITS};

pub(crate) struct WordBuffer {
    head: NonNull<Word>,
    /// Allocated block size in words.
    capacity: usize,
    /// Logical length in bits.
    len: usize,
}

// The buffer is the exclusive owner of its block; `&self` access is
// read-only.
unsafe impl Send for WordBuffer {}
unsafe impl Sync for WordBuffer {}

impl WordBuffer {
    /// An empty buffer. Never touches the allocator.
    pub fn new() -> WordBuffer {
        WordBuffer {
            head: NonNull::dangling(),
            capacity: 0,
            len: 0,
        }
    }

    /// Storage for `bits` bits, every word zero.
    pub fn zeroed(bits: usize) -> Result<WordBuffer, AllocError> {
        let count = word::words_for(bits);
        let head = word_alloc::allocate_zeroed(count)?;
        Ok(WordBuffer {
            head,
            capacity: count,
            len: bits,
        })
    }

    /// Storage for `bits` bits with `capacity` words allocated, every word
    /// zero.
    pub fn zeroed_with_capacity(bits: usize, capacity: usize) -> Result<WordBuffer, AllocError> {
        debug_assert!(word::words_for(bits) <= capacity);
        let head = word_alloc::allocate_zeroed(capacity)?;
        Ok(WordBuffer {
            head,
            capacity,
            len: bits,
        })
    }

    /// Storage for `bits` bits with unspecified word content.
    ///
    /// The caller must write every occupied word (e.g. via
    /// [`WordBuffer::fill_words`]) before the buffer is observed through
    /// [`WordBuffer::as_words`].
    pub fn with_len_uninit(bits: usize) -> Result<WordBuffer, AllocError> {
        let count = word::words_for(bits);
        let head = word_alloc::allocate(count)?;
        Ok(WordBuffer {
            head,
            capacity: count,
            len: bits,
        })
    }

    /// Logical length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of occupied words, `len.div_ceil(64)`.
    #[inline]
    pub fn word_count(&self) -> usize {
        word::words_for(self.len)
    }

    /// Allocated size in words.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sets the logical bit length without touching storage.
    ///
    /// The new word count must fit the capacity; any newly occupied words
    /// must have been initialized by the caller.
    #[inline]
    pub fn set_len(&mut self, bits: usize) {
        debug_assert!(word::words_for(bits) <= self.capacity);
        self.len = bits;
    }

    #[inline]
    pub fn as_words(&self) -> &[Word] {
        unsafe { std::slice::from_raw_parts(self.head.as_ptr(), self.word_count()) }
    }

    #[inline]
    pub fn as_mut_words(&mut self) -> &mut [Word] {
        unsafe { std::slice::from_raw_parts_mut(self.head.as_ptr(), self.word_count()) }
    }

    /// O(1) exchange of storage, capacity and length.
    pub fn swap(&mut self, other: &mut WordBuffer) {
        std::mem::swap(self, other);
    }

    /// Fills every occupied word with the byte pattern `fill`. Initializes
    /// storage obtained from [`WordBuffer::with_len_uninit`].
    pub fn fill_words(&mut self, fill: u8) {
        unsafe { std::ptr::write_bytes(self.head.as_ptr(), fill, self.word_count()) }
    }

    /// Zero-initializes the words at indices `[from, to)`, which may lie
    /// beyond the current word count but not beyond the capacity.
    pub fn zero_words(&mut self, from: usize, to: usize) {
        debug_assert!(to <= self.capacity);
        if from < to {
            unsafe { std::ptr::write_bytes(self.head.as_ptr().add(from), 0, to - from) }
        }
    }

    /// Re-applies the trailing-bit invariant for the current length.
    pub fn mask_tail(&mut self) {
        let len = self.len;
        word::mask_tail(self.as_mut_words(), len);
    }

    /// Makes room for one more bit on a word boundary and writes `fill`
    /// into the newly occupied word.
    ///
    /// Doubles the capacity when the occupied words already fill it: the
    /// new block is allocated first, old contents copied, and only then is
    /// the old block freed, so a failure leaves the buffer untouched.
    pub fn grow_for_push(&mut self, fill: Word) -> Result<(), AllocError> {
        debug_assert!(self.len % WORD_BITS == 0);
        let occupied = self.len / WORD_BITS;
        if occupied == self.capacity {
            let new_capacity = std::cmp::max(1, self.capacity * 2);
            let head = word_alloc::allocate(new_capacity)?;
            unsafe {
                std::ptr::copy_nonoverlapping(self.head.as_ptr(), head.as_ptr(), occupied);
            }
            self.release();
            self.head = head;
            self.capacity = new_capacity;
        }
        self.len += 1;
        unsafe { self.head.as_ptr().add(occupied).write(fill) };
        Ok(())
    }

    /// Re-targets the buffer at `bits` bits of unspecified content, reusing
    /// the allocation when the capacity suffices.
    ///
    /// The old contents are discarded either way, so on reallocation the
    /// old block is freed first; if the new allocation then fails, the
    /// buffer is left in the valid empty state rather than dangling.
    pub fn reuse_or_realloc(&mut self, bits: usize) -> Result<(), AllocError> {
        let count = word::words_for(bits);
        if self.capacity < count {
            let target = count + self.capacity;
            self.release();
            self.head = NonNull::dangling();
            self.capacity = 0;
            self.len = 0;
            self.head = word_alloc::allocate(target)?;
            self.capacity = target;
        }
        self.len = bits;
        Ok(())
    }

    fn release(&mut self) {
        unsafe { word_alloc::deallocate(self.head, self.capacity) }
    }
}

impl Clone for WordBuffer {
    /// Deep copy of exactly the occupied words; the clone's capacity is
    /// its word count, not the source capacity.
    fn clone(&self) -> WordBuffer {
        let count = self.word_count();
        let head = word_alloc::allocate(count).unwrap_or_else(|err| word_alloc::allocation_failed(err));
        unsafe {
            std::ptr::copy_nonoverlapping(self.head.as_ptr(), head.as_ptr(), count);
        }
        WordBuffer {
            head,
            capacity: count,
            len: self.len,
        }
    }

    /// Copy assignment that reuses the existing allocation when it is
    /// large enough.
    fn clone_from(&mut self, source: &WordBuffer) {
        let count = source.word_count();
        if self.capacity < count {
            self.release();
            self.head = NonNull::dangling();
            self.capacity = 0;
            self.len = 0;
            self.head =
                word_alloc::allocate(count).unwrap_or_else(|err| word_alloc::allocation_failed(err));
            self.capacity = count;
        }
        unsafe {
            std::ptr::copy_nonoverlapping(source.head.as_ptr(), self.head.as_ptr(), count);
        }
        self.len = source.len;
    }
}

impl Drop for WordBuffer {
    fn drop(&mut self) {
        self.release();
    }
}
