use crate::DynamicBitset;
use crate::tests::{assert_tail_masked, from_pattern, random_bits, to_pattern};

/// Reference model of a left shift: `k` zeros in front of the old bits.
fn shl_model(bits: &[bool], k: usize) -> Vec<bool> {
    let mut shifted = vec![false; k];
    shifted.extend_from_slice(bits);
    shifted
}

/// Reference model of a right shift: drop the low `k` bits.
fn shr_model(bits: &[bool], k: usize) -> Vec<bool> {
    if k >= bits.len() {
        vec![]
    } else {
        bits[k..].to_vec()
    }
}

fn check_shift_left(len: usize, k: usize) {
    let (mut bits, model) = random_bits(len);
    bits.shift_left(k).expect("shift");
    let expected = DynamicBitset::from_bools(&shl_model(&model, k)).expect("allocate");
    assert_eq!(bits, expected, "len {len} << {k}");
    assert_tail_masked(&bits);
}

fn check_shift_right(len: usize, k: usize) {
    let (mut bits, model) = random_bits(len);
    bits.shift_right(k);
    let expected = DynamicBitset::from_bools(&shr_model(&model, k)).expect("allocate");
    assert_eq!(bits, expected, "len {len} >> {k}");
    assert_tail_masked(&bits);
}

#[test]
fn test_shift_left_exact_vector() {
    // 5 bits shifted by 3: the original bits move to positions 3..8 and
    // the vacated low positions read zero.
    let mut bits = from_pattern("01101");
    bits <<= 3;
    assert_eq!(bits.len(), 8);
    assert_eq!(to_pattern(&bits), "00001101");
}

#[test]
fn test_shift_right_exact_vector() {
    let mut bits = from_pattern("00001101");
    bits >>= 3;
    assert_eq!(bits.len(), 5);
    assert_eq!(to_pattern(&bits), "01101");
}

#[test]
fn test_shift_left_misaligned_counts() {
    fastrand::seed(1001);
    for len in [1, 5, 63, 64, 65, 127, 128, 129, 300] {
        for k in [1, 3, 7, 13, 63, 65, 67, 129] {
            check_shift_left(len, k);
        }
    }
}

#[test]
fn test_shift_left_byte_aligned_counts() {
    fastrand::seed(1002);
    for len in [1, 5, 63, 64, 65, 127, 128, 129, 300] {
        for k in [8, 16, 24, 56, 64, 72, 128, 256] {
            check_shift_left(len, k);
        }
    }
}

#[test]
fn test_shift_right_misaligned_counts() {
    fastrand::seed(1003);
    for len in [1, 5, 63, 64, 65, 127, 128, 129, 300] {
        for k in [1, 3, 7, 13, 63, 65, 67, 129] {
            check_shift_right(len, k);
        }
    }
}

#[test]
fn test_shift_right_byte_aligned_counts() {
    fastrand::seed(1004);
    for len in [1, 5, 63, 64, 65, 127, 128, 129, 300] {
        for k in [8, 16, 24, 56, 64, 72, 128, 256] {
            check_shift_right(len, k);
        }
    }
}

#[test]
fn test_shift_by_zero_is_identity() {
    fastrand::seed(1005);
    let (mut bits, _) = random_bits(100);
    let before = bits.clone();
    bits <<= 0;
    assert_eq!(bits, before);
    bits >>= 0;
    assert_eq!(bits, before);
}

#[test]
fn test_shift_round_trip() {
    fastrand::seed(1006);
    for len in [1, 17, 63, 64, 65, 200, 333] {
        for k in [0, 1, 8, 13, 64, 65, 100] {
            let (bits, _) = random_bits(len);
            let mut shifted = bits.clone();
            shifted <<= k;
            assert_eq!(shifted.len(), len + k);
            shifted >>= k;
            assert_eq!(shifted, bits, "len {len}, k {k}");
        }
    }
}

#[test]
fn test_shift_left_on_empty_produces_zeros() {
    let mut bits = DynamicBitset::new();
    bits <<= 40;
    assert_eq!(bits.len(), 40);
    assert!(bits.none());
    assert_tail_masked(&bits);

    let mut bits = DynamicBitset::new();
    bits.shift_left(0).expect("shift");
    assert!(bits.is_empty());
}

#[test]
fn test_shift_right_past_the_length_empties() {
    let (mut bits, _) = {
        fastrand::seed(1007);
        random_bits(100)
    };
    bits >>= 100;
    assert!(bits.is_empty());

    let (mut bits, _) = random_bits(100);
    bits >>= 5000;
    assert!(bits.is_empty());

    let mut empty = DynamicBitset::new();
    empty >>= 3;
    assert!(empty.is_empty());
}

#[test]
fn test_shift_left_within_capacity_runs_in_place() {
    // Build slack capacity first, then shift inside it: no reallocation.
    let mut bits = DynamicBitset::new();
    for _ in 0..8 {
        bits.push_back(true).expect("push");
    }
    for _ in 0..120 {
        bits.push_back(false).expect("push");
    }
    for _ in 0..120 {
        bits.pop_back();
    }
    let capacity = bits.capacity_words();
    assert!(capacity >= 2);

    bits.shift_left(64).expect("shift");
    assert_eq!(bits.capacity_words(), capacity);
    assert_eq!(bits.len(), 72);
    assert_eq!(bits.count_ones(), 8);
    assert_eq!(bits.find_first(), Some(64));
}

#[test]
fn test_shift_left_reallocates_with_slack() {
    let mut bits = DynamicBitset::repeat(true, 64).expect("allocate");
    assert_eq!(bits.capacity_words(), 1);
    bits.shift_left(64).expect("shift");
    // New word count (2) plus the old capacity (1).
    assert_eq!(bits.capacity_words(), 3);
    assert_eq!(bits.len(), 128);
    assert_eq!(bits.count_ones(), 64);
    assert_eq!(bits.find_first(), Some(64));
}

#[test]
fn test_shift_left_carries_across_words() {
    // A single bit walks the word boundary under every sub-word shift.
    for start in [0, 1, 62, 63] {
        for k in 1..=64 {
            let mut bits = DynamicBitset::zeroed(64).expect("allocate");
            bits.set(start);
            bits <<= k;
            assert_eq!(bits.count_ones(), 1, "start {start}, k {k}");
            assert_eq!(bits.find_first(), Some(start + k), "start {start}, k {k}");
        }
    }
}

#[test]
fn test_shift_right_carries_across_words() {
    for target in [0, 1, 63, 64, 65, 126] {
        for k in 1..=64 {
            let mut bits = DynamicBitset::zeroed(192).expect("allocate");
            bits.set(target + k);
            bits >>= k;
            assert_eq!(bits.count_ones(), 1, "target {target}, k {k}");
            assert_eq!(bits.find_first(), Some(target), "target {target}, k {k}");
        }
    }
}

#[test]
fn test_repeated_shifts_compose() {
    fastrand::seed(1008);
    let (bits, model) = random_bits(90);
    let mut shifted = bits.clone();
    let mut total = 0;
    for k in [3, 8, 1, 64, 13, 16] {
        shifted <<= k;
        total += k;
        assert_tail_masked(&shifted);
    }
    let expected = DynamicBitset::from_bools(&shl_model(&model, total)).expect("allocate");
    assert_eq!(shifted, expected);
}
