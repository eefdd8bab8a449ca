//! Optional allocation tracking for diagnostics.
//!
//! [`TrackingAlloc`] wraps the crate's raw entry points and keeps a ledger
//! of live blocks, so a test harness can detect leaks, double frees and
//! word-count mismatches that the raw layer leaves undefined. The tracker
//! is an explicit, caller-owned object: open one around the code under
//! test, route allocations through it, and [`close`](TrackingAlloc::close)
//! it to assert that everything allocated was returned.
//!
//! Tracking has no effect on the blocks themselves; the wrapped functions
//! hand out exactly what the raw layer would.

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ptr::NonNull;

use crate::AllocError;

/// A leak/mismatch checker over the raw word allocation functions.
pub struct TrackingAlloc {
    /// Live blocks keyed by address, holding the word count handed out.
    live: RefCell<HashMap<usize, usize>>,
    allocated_words: Cell<usize>,
    freed_words: Cell<usize>,
}

impl TrackingAlloc {
    /// Starts a tracking scope.
    pub fn open() -> TrackingAlloc {
        log::info!("word allocation tracking enabled");
        TrackingAlloc {
            live: RefCell::new(HashMap::new()),
            allocated_words: Cell::new(0),
            freed_words: Cell::new(0),
        }
    }

    /// Tracked version of [`crate::allocate`].
    pub fn allocate(&self, words: usize) -> Result<NonNull<u64>, AllocError> {
        let ptr = crate::allocate(words)?;
        self.record(ptr, words);
        Ok(ptr)
    }

    /// Tracked version of [`crate::allocate_zeroed`].
    pub fn allocate_zeroed(&self, words: usize) -> Result<NonNull<u64>, AllocError> {
        let ptr = crate::allocate_zeroed(words)?;
        self.record(ptr, words);
        Ok(ptr)
    }

    /// Tracked version of [`crate::deallocate`].
    ///
    /// Panics instead of invoking undefined behavior when `ptr` is not a
    /// live block of this tracker or `words` does not match the count it
    /// was allocated with.
    ///
    /// # Safety
    ///
    /// Same contract as [`crate::deallocate`], except that the mismatches
    /// listed above are caught before the raw layer is reached.
    pub unsafe fn deallocate(&self, ptr: NonNull<u64>, words: usize) {
        if words != 0 {
            match self.live.borrow_mut().remove(&(ptr.as_ptr() as usize)) {
                Some(recorded) if recorded == words => {
                    self.freed_words.set(self.freed_words.get() + words);
                }
                Some(recorded) => {
                    panic!("block of {recorded} words returned with a count of {words}")
                }
                None => panic!("deallocate of a block this tracker does not own"),
            }
        }
        unsafe { crate::deallocate(ptr, words) }
    }

    /// Number of blocks currently outstanding.
    pub fn live_blocks(&self) -> usize {
        self.live.borrow().len()
    }

    /// Total words handed out since [`open`](TrackingAlloc::open).
    pub fn allocated_words(&self) -> usize {
        self.allocated_words.get()
    }

    /// Ends the tracking scope, asserting that no block is outstanding.
    pub fn close(self) {
        let leaked: usize = self.live.borrow().values().sum();
        if leaked != 0 {
            log::error!(
                "{} block(s) holding {leaked} words were never deallocated",
                self.live.borrow().len()
            );
            panic!("word allocation tracking found {leaked} leaked words");
        }
        log::info!(
            "word allocation tracking closed: {} words allocated and freed",
            self.allocated_words.get()
        );
    }

    fn record(&self, ptr: NonNull<u64>, words: usize) {
        if words == 0 {
            return;
        }
        let prev = self.live.borrow_mut().insert(ptr.as_ptr() as usize, words);
        debug_assert!(prev.is_none(), "allocator returned a live address twice");
        self.allocated_words
            .set(self.allocated_words.get() + words);
    }
}
