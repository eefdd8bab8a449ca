mod shift_tests;

use crate::DynamicBitset;

/// Builds a bitset from an LSB-first pattern string: `pattern[i]` gives
/// bit `i`.
pub(crate) fn from_pattern(pattern: &str) -> DynamicBitset {
    let bools: Vec<bool> = pattern.chars().map(|c| c == '1').collect();
    DynamicBitset::from_bools(&bools).expect("allocate")
}

/// Renders a bitset as an LSB-first pattern string.
pub(crate) fn to_pattern(bits: &DynamicBitset) -> String {
    (0..bits.len())
        .map(|i| if bits.test(i) { '1' } else { '0' })
        .collect()
}

/// A seeded random bitset of the given length, alongside its `Vec<bool>`
/// reference model.
pub(crate) fn random_bits(len: usize) -> (DynamicBitset, Vec<bool>) {
    let model: Vec<bool> = (0..len).map(|_| fastrand::bool()).collect();
    let bits = DynamicBitset::from_bools(&model).expect("allocate");
    (bits, model)
}

/// Asserts the trailing-bit invariant: every bit at position `len()` or
/// above in the last occupied word is zero.
pub(crate) fn assert_tail_masked(bits: &DynamicBitset) {
    let words = bits.as_words();
    let rem = bits.len() % 64;
    if rem != 0 {
        assert_eq!(
            words[words.len() - 1] >> rem,
            0,
            "stale bits beyond len {}",
            bits.len()
        );
    }
}
