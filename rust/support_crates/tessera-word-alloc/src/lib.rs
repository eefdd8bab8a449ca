//! Raw allocation of `u64` word blocks.
//!
//! This crate is the storage primitive underneath `tessera-bitset`: it hands
//! out blocks measured in 64-bit words, either uninitialized ([`allocate`])
//! or zero-filled ([`allocate_zeroed`]), and releases them with
//! [`deallocate`]. Allocation failures surface as [`AllocError`] rather than
//! aborting, so the consumer decides whether to propagate or escalate.
//!
//! Zero-word requests are valid and never touch the system allocator: they
//! return a well-aligned dangling pointer that [`deallocate`] accepts as a
//! no-op.
//!
//! The [`tracking`] module provides an optional, explicitly scoped
//! leak/mismatch checker over the same entry points, intended for test
//! harnesses.

use std::alloc::Layout;
use std::ptr::NonNull;

use thiserror::Error;

pub mod tracking;


/// Failure to produce a word block.
#[derive(Debug, Error)]
pub enum AllocError {
    /// The system allocator could not satisfy the request, or the request
    /// itself exceeds the maximum allocation size.
    #[error("failed to allocate a block of {words} words")]
    OutOfMemory { words: usize },
}

impl AllocError {
    /// The word count of the failed request.
    pub fn words(&self) -> usize {
        match self {
            AllocError::OutOfMemory { words } => *words,
        }
    }
}

#[inline]
fn word_layout(words: usize) -> Result<Layout, AllocError> {
    Layout::array::<u64>(words).map_err(|_| AllocError::OutOfMemory { words })
}

/// Allocates a block of `words` 64-bit words with unspecified content.
///
/// The caller must write a word before reading it back. The block must be
/// released with [`deallocate`] using the same `words` count.
pub fn allocate(words: usize) -> Result<NonNull<u64>, AllocError> {
    if words == 0 {
        return Ok(NonNull::dangling());
    }
    let layout = word_layout(words)?;
    let ptr = unsafe { std::alloc::alloc(layout) };
    NonNull::new(ptr as *mut u64).ok_or(AllocError::OutOfMemory { words })
}

/// Allocates a block of `words` 64-bit words, all zero.
pub fn allocate_zeroed(words: usize) -> Result<NonNull<u64>, AllocError> {
    if words == 0 {
        return Ok(NonNull::dangling());
    }
    let layout = word_layout(words)?;
    let ptr = unsafe { std::alloc::alloc_zeroed(layout) };
    NonNull::new(ptr as *mut u64).ok_or(AllocError::OutOfMemory { words })
}

/// Releases a block previously obtained from [`allocate`] or
/// [`allocate_zeroed`].
///
/// # Safety
///
/// `ptr` must come from one of this crate's allocation functions and `words`
/// must equal the count passed at allocation time. Double frees and
/// mismatched counts are undefined behavior at this layer; see
/// [`tracking::TrackingAlloc`] for a checked wrapper.
pub unsafe fn deallocate(ptr: NonNull<u64>, words: usize) {
    if words == 0 {
        return;
    }
    let layout = word_layout(words).expect("block size was validated at allocation time");
    unsafe { std::alloc::dealloc(ptr.as_ptr() as *mut u8, layout) }
}

/// Escalates an allocation failure through the global allocation error hook.
///
/// For callers whose signatures cannot propagate [`AllocError`] (`Clone`
/// impls, operator traits). Does not return.
pub fn allocation_failed(err: AllocError) -> ! {
    let layout = Layout::array::<u64>(err.words()).unwrap_or(Layout::new::<u64>());
    std::alloc::handle_alloc_error(layout)
}
