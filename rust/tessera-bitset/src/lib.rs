//! Dynamically sized, word-packed bitset.
//!
//! [`DynamicBitset`] stores bits little-endian in `u64` words with a
//! logical bit length tracked separately from the allocated word capacity.
//! It supports indexed access (checked and unchecked), bulk boolean
//! algebra over the overlapping prefix of two bitsets (`&=`, `|=`, `^=`),
//! arbitrary-length logical shifts with a byte-aligned block-move fast
//! path, and amortized O(1) `push_back`.
//!
//! Storage invariant
//! - All bits at positions `len()` and above in the last occupied word are
//!   zero at every externally observable point. Every mutating operation
//!   re-establishes this before returning, which is what lets counting,
//!   `all()`, shifts and the bitwise operators work on whole words.
//!
//! Storage is obtained from the `tessera-word-alloc` crate; operations
//! that may allocate return [`Result`] and leave the bitset in its prior
//! valid state on failure.

mod bit_ref;
mod bitset;
mod bitwise;
mod buffer;
mod error;
mod shift;
mod word;

#[cfg(test)]
mod tests;

pub use bit_ref::BitRef;
pub use bitset::{DynamicBitset, OnesIter};
pub use error::{Error, ErrorKind, Result};
