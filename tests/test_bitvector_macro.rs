use smol_bitset::{DynamicBitVector, bitvector};

#[test]
fn test_empty_vector() {
    let bits = bitvector![];
    assert!(bits.is_empty());
    assert_eq!(bits.byte_capacity(), 0);
}

#[test]
fn test_single_bit() {
    let bits = bitvector![1];
    assert_eq!(bits.len(), 1);
    assert_eq!(bits.get(0), Some(true));
    assert_eq!(bits.get(1), None);
}

#[test]
fn test_literal_list() {
    let bits = bitvector![1, 0, 0, 1, 1, 0, 1, 0, 1];
    assert_eq!(bits.len(), 9);
    assert_eq!(bits.to_string(), "100110101");
    assert_eq!(bits.ones().collect::<Vec<_>>(), [0, 3, 4, 6, 8]);
}

#[test]
fn test_bool_list_with_trailing_comma() {
    let bits = bitvector![true, false, true,];
    assert_eq!(bits, bitvector![1, 0, 1]);
}

#[test]
fn test_expressions() {
    let threshold = 3;
    let bits = bitvector![threshold > 2, threshold > 5, threshold % 2];
    assert_eq!(bits.to_string(), "101");
}

#[test]
fn test_repeat_form() {
    let ones = bitvector![true; 20];
    assert_eq!(ones.len(), 20);
    assert!(ones.all());
    assert_eq!(ones.byte_capacity(), 3);

    let zeros = bitvector![0; 20];
    assert!(zeros.none());
    assert_eq!(zeros, DynamicBitVector::with_len(20).unwrap());

    let none = bitvector![true; 0];
    assert!(none.is_empty());
}

#[test]
fn test_repeat_form_masks_tail() {
    let mut bits = bitvector![1; 3];
    bits.resize(8, false).unwrap();
    assert_eq!(bits.to_string(), "11100000");
}
