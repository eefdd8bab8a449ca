//! Logical shifts over word slices.
//!
//! Two regimes, selected by the shift count:
//!
//! - **Byte-aligned** (`shift % 8 == 0`): whole bytes move with a single
//!   block copy over the storage reinterpreted as `[u8]`, plus a zero fill
//!   of the vacated prefix. No bit arithmetic at all.
//! - **Misaligned**: the shift splits into `word_shift = shift / 64` and
//!   `bit_shift = shift % 64`, and a word walk deposits
//!   `prev << bit_shift | cur >> (64 - bit_shift)` (or the mirrored form
//!   for right shifts), carrying bits across every word boundary.
//!
//! The callers own the length bookkeeping and re-apply the trailing-bit
//! invariant afterwards; these routines only move bits.

#[cfg(not(target_endian = "little"))]
compile_error!("the byte-aligned shift fast path equates byte order with bit order");

use crate::word::{self, Word, WORD_BITS};

/// Shifts `src` left by `shift` bits into `dst`.
///
/// `total_bits` is the logical length after the shift (source length plus
/// `shift`). `dst` spans the words for `total_bits` and must be zero-filled;
/// `src` spans the words of the source length. Used by the reallocating
/// shift path, which rewrites the old block into the fresh one in a single
/// pass.
pub(crate) fn shift_left_into(dst: &mut [Word], src: &[Word], total_bits: usize, shift: usize) {
    debug_assert_eq!(dst.len(), word::words_for(total_bits));
    debug_assert_eq!(src.len(), word::words_for(total_bits - shift));

    if shift % 8 == 0 {
        let offset = shift / 8;
        let src_bytes = (total_bits - shift).div_ceil(8);
        bytemuck::cast_slice_mut::<Word, u8>(dst)[offset..offset + src_bytes]
            .copy_from_slice(&bytemuck::cast_slice::<Word, u8>(src)[..src_bytes]);
        return;
    }

    let (word_shift, bit_shift) = word::split_index(shift);
    let rev = WORD_BITS - bit_shift;
    let top = (total_bits - 1) / WORD_BITS;
    // The walk may look one word past the source's occupied extent; those
    // bits do not exist and read as zero.
    let fetch = |index: usize| if index < src.len() { src[index] } else { 0 };

    let mut prev = fetch(top - word_shift);
    for i in (word_shift + 1..=top).rev() {
        let cur = fetch(i - 1 - word_shift);
        dst[i] = prev << bit_shift | cur >> rev;
        prev = cur;
    }
    dst[word_shift] = prev << bit_shift;
}

/// Shifts the low `total_bits - shift` bits of `words` left by `shift` in
/// place.
///
/// `words` spans the words for `total_bits`; any words past the pre-shift
/// extent must already be zero. Walking from the highest word downward
/// keeps every read ahead of the writes, so no scratch space is needed.
pub(crate) fn shift_left_in_place(words: &mut [Word], total_bits: usize, shift: usize) {
    debug_assert_eq!(words.len(), word::words_for(total_bits));
    debug_assert!(shift <= total_bits);

    if shift % 8 == 0 {
        let offset = shift / 8;
        if offset == 0 {
            return;
        }
        let src_bytes = (total_bits - shift).div_ceil(8);
        let bytes = bytemuck::cast_slice_mut::<Word, u8>(words);
        bytes.copy_within(..src_bytes, offset);
        bytes[..offset].fill(0);
        return;
    }

    let (word_shift, bit_shift) = word::split_index(shift);
    let rev = WORD_BITS - bit_shift;
    let top = (total_bits - 1) / WORD_BITS;

    let mut prev = words[top - word_shift];
    for i in (word_shift + 1..=top).rev() {
        let cur = words[i - 1 - word_shift];
        words[i] = prev << bit_shift | cur >> rev;
        prev = cur;
    }
    words[word_shift] = prev << bit_shift;
    words[..word_shift].fill(0);
}

/// Shifts `words` right by `shift` bits in place, dropping the low `shift`
/// bits.
///
/// `new_total_bits` is the logical length after the shift; `words` spans
/// the words of the pre-shift length. The caller shrinks the length
/// afterwards, which retires the stale words this leaves at the top.
pub(crate) fn shift_right_in_place(words: &mut [Word], new_total_bits: usize, shift: usize) {
    debug_assert!(new_total_bits > 0);
    debug_assert_eq!(words.len(), word::words_for(new_total_bits + shift));

    if shift % 8 == 0 {
        let offset = shift / 8;
        if offset == 0 {
            return;
        }
        let kept_bytes = new_total_bits.div_ceil(8);
        let bytes = bytemuck::cast_slice_mut::<Word, u8>(words);
        bytes.copy_within(offset..offset + kept_bytes, 0);
        return;
    }

    let (word_shift, bit_shift) = word::split_index(shift);
    let rev = WORD_BITS - bit_shift;
    let last = (new_total_bits + shift - 1) / WORD_BITS - word_shift;

    let mut prev = words[word_shift];
    for i in 0..last {
        let cur = words[i + 1 + word_shift];
        words[i] = prev >> bit_shift | cur << rev;
        prev = cur;
    }
    words[last] = prev >> bit_shift;
}
