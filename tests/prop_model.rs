use num_bigint::BigUint;
use proptest::prelude::*;
use smol_bitset::{DynamicBitVector, FixedBitSet};

// Strategy for generating a vector together with its `Vec<bool>` model
prop_compose! {
    fn arb_bits(max_len: usize)
        (model in prop::collection::vec(any::<bool>(), 0..max_len))
        -> (DynamicBitVector, Vec<bool>)
    {
        (model.iter().copied().collect(), model)
    }
}

// Strategy for generating two vectors of the same length
prop_compose! {
    fn arb_pair(max_len: usize)
        (len in 1..max_len)
        (a in prop::collection::vec(any::<bool>(), len),
         b in prop::collection::vec(any::<bool>(), len))
        -> (Vec<bool>, Vec<bool>)
    {
        (a, b)
    }
}

fn to_model(bits: &DynamicBitVector) -> Vec<bool> {
    bits.iter().collect()
}

/// Bit index `i` of the vector is bit `i` of the integer.
fn to_biguint(bits: &DynamicBitVector) -> BigUint {
    let mut value = BigUint::default();
    for i in bits.ones() {
        value.set_bit(i as u64, true);
    }
    value
}

proptest! {
    #[test]
    fn test_matches_model((bits, model) in arb_bits(300)) {
        prop_assert_eq!(bits.len(), model.len());
        prop_assert_eq!(to_model(&bits), model.clone());
        prop_assert_eq!(bits.count(), model.iter().filter(|&&b| b).count());

        let ones: Vec<usize> = bits.ones().collect();
        let expected: Vec<usize> = (0..model.len()).filter(|&i| model[i]).collect();
        prop_assert_eq!(ones, expected.clone());

        let mut rev: Vec<usize> = bits.ones().rev().collect();
        rev.reverse();
        prop_assert_eq!(rev, expected);
    }

    #[test]
    fn test_count_any_none_all((bits, _) in arb_bits(200)) {
        prop_assert_eq!(bits.any(), bits.count() > 0);
        prop_assert_eq!(bits.none(), !bits.any());
        prop_assert_eq!(bits.all(), bits.count() == bits.len());
    }

    #[test]
    fn test_string_round_trip((bits, model) in arb_bits(300)) {
        let s = bits.to_string();
        prop_assert_eq!(s.len(), model.len());
        let parsed: DynamicBitVector = s.parse().unwrap();
        prop_assert_eq!(parsed, bits);
    }

    #[test]
    fn test_push_pop_round_trip(model in prop::collection::vec(any::<bool>(), 0..300)) {
        let mut bits = DynamicBitVector::new();
        for &bit in &model {
            bits.push(bit).unwrap();
        }
        for (i, &bit) in model.iter().enumerate() {
            prop_assert_eq!(bits[i], bit);
        }
        for &bit in model.iter().rev() {
            prop_assert_eq!(bits.pop(), Ok(bit));
        }
        prop_assert!(bits.is_empty());
    }

    #[test]
    fn test_shift_down_matches_model((mut bits, model) in arb_bits(200), k in 0usize..250) {
        bits >>= k;
        let expected: Vec<bool> = (0..model.len())
            .map(|i| model.get(i + k).copied().unwrap_or(false))
            .collect();
        prop_assert_eq!(to_model(&bits), expected);
    }

    #[test]
    fn test_shift_up_matches_model((mut bits, model) in arb_bits(200), k in 0usize..250) {
        bits <<= k;
        let expected: Vec<bool> = (0..model.len())
            .map(|i| i >= k && model[i - k])
            .collect();
        prop_assert_eq!(to_model(&bits), expected);
    }

    #[test]
    fn test_resize_matches_model(
        (mut bits, mut model) in arb_bits(200),
        new_len in 0usize..300,
        fill in any::<bool>()
    ) {
        let before = bits.count();
        let old_len = bits.len();
        bits.resize(new_len, fill).unwrap();
        model.resize(new_len, fill);
        prop_assert_eq!(to_model(&bits), model);
        if new_len > old_len && fill {
            prop_assert_eq!(bits.count(), before + (new_len - old_len));
        }
    }

    #[test]
    fn test_binary_ops_match_model((a, b) in arb_pair(200)) {
        let va: DynamicBitVector = a.iter().copied().collect();
        let vb: DynamicBitVector = b.iter().copied().collect();

        let and: Vec<bool> = a.iter().zip(&b).map(|(x, y)| x & y).collect();
        let or: Vec<bool> = a.iter().zip(&b).map(|(x, y)| x | y).collect();
        let xor: Vec<bool> = a.iter().zip(&b).map(|(x, y)| x ^ y).collect();
        let not: Vec<bool> = a.iter().map(|x| !x).collect();

        prop_assert_eq!(to_model(&(&va & &vb)), and);
        prop_assert_eq!(to_model(&(&va | &vb)), or);
        prop_assert_eq!(to_model(&(&va ^ &vb)), xor);
        prop_assert_eq!(to_model(&!&va), not);
    }

    #[test]
    fn test_fixed_matches_dynamic(value in any::<u128>(), k in 0usize..140) {
        let mut fixed: FixedBitSet!(100) = FixedBitSet::from(value);
        let mut dynamic = DynamicBitVector::from_value(100, value).unwrap();
        prop_assert_eq!(fixed, dynamic.clone());

        fixed >>= k;
        dynamic >>= k;
        prop_assert_eq!(fixed, dynamic.clone());

        fixed <<= k / 2;
        dynamic <<= k / 2;
        prop_assert_eq!(fixed, dynamic.clone());
        prop_assert_eq!(fixed.to_string(), dynamic.to_string());
    }

    #[test]
    fn test_integer_round_trip(value in any::<u64>()) {
        let fixed: FixedBitSet!(64) = FixedBitSet::from(value);
        prop_assert_eq!(u64::try_from(&fixed), Ok(value));
        prop_assert_eq!(fixed.as_bytes()[0].reverse_bits(), value as u8);

        let dynamic = DynamicBitVector::from(fixed);
        prop_assert_eq!(u128::try_from(&dynamic), Ok(u128::from(value)));
    }

    #[test]
    fn test_shifts_match_bigint(
        bytes in prop::collection::vec(any::<u8>(), 1..40),
        k in 0usize..400
    ) {
        let len = bytes.len() * 8 - 3;
        let value = BigUint::from_bytes_le(&bytes);
        let bits: DynamicBitVector = (0..len as u64).map(|i| value.bit(i)).collect();
        let mask = (BigUint::from(1u8) << len) - 1u8;

        let mut up = bits.clone();
        up <<= k;
        prop_assert_eq!(to_biguint(&up), (to_biguint(&bits) << k) & &mask);

        let mut down = bits.clone();
        down >>= k;
        prop_assert_eq!(to_biguint(&down), to_biguint(&bits) >> k);
    }
}
