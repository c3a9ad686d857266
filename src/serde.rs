//! Serde implementations for `FixedBitSet` and `DynamicBitVector`.
//!
//! Human-readable formats get the same `'0'`/`'1'` string as `Display`.
//! Binary formats get raw bytes for a [`FixedBitSet`] and a `(len, bytes)`
//! tuple for a [`DynamicBitVector`]. The [`packed`] module keeps the tuple
//! form for human-readable formats too, with the bytes in base64.

use alloc::vec::Vec;
use core::{fmt, marker::PhantomData, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess, Visitor},
    ser::SerializeTuple,
};

use crate::{
    DynamicBitVector, FixedBitSet, GrowthPolicy,
    storage::{self, bytes_for},
};

/// Expected byte count in error messages.
struct ByteCount(usize);

impl de::Expected for ByteCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

/// Deserializes any bit container from its `FromStr` form.
struct BitStringVisitor<T>(PhantomData<fn() -> T>);

impl<T> Visitor<'_> for BitStringVisitor<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string of '0' and '1' characters")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(E::custom)
    }
}

/// Raw storage bytes: base64 text for human-readable formats, a byte string
/// otherwise.
struct Payload<'a>(&'a [u8]);

impl Serialize for Payload<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            let encoded = data_encoding::BASE64.encode(self.0);
            serializer.serialize_str(&encoded)
        } else {
            serializer.serialize_bytes(self.0)
        }
    }
}

/// Owned counterpart of [`Payload`].
struct PayloadBuf(Vec<u8>);

impl<'de> Deserialize<'de> for PayloadBuf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PayloadVisitor;

        impl<'de> Visitor<'de> for PayloadVisitor {
            type Value = PayloadBuf;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("base64 text or a byte string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let decoded = data_encoding::BASE64
                    .decode(v.as_bytes())
                    .map_err(E::custom)?;
                Ok(PayloadBuf(decoded))
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PayloadBuf(v.to_vec()))
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(PayloadBuf(v))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                Ok(PayloadBuf(bytes))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(PayloadVisitor)
        } else {
            deserializer.deserialize_byte_buf(PayloadVisitor)
        }
    }
}

impl<const N: usize, const B: usize> Serialize for FixedBitSet<N, B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            Payload(&self.bytes).serialize(serializer)
        }
    }
}

impl<'de, const N: usize, const B: usize> Deserialize<'de> for FixedBitSet<N, B> {
    /// Accepts exactly `N` characters, or exactly `B` bytes. Bits of the final
    /// byte past `N` are discarded.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            return deserializer.deserialize_str(BitStringVisitor(PhantomData));
        }

        let PayloadBuf(bytes) = PayloadBuf::deserialize(deserializer)?;
        let bytes: [u8; B] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| <D::Error as de::Error>::invalid_length(bytes.len(), &ByteCount(B)))?;
        Ok(Self::from_bytes(bytes))
    }
}

impl<P: GrowthPolicy> Serialize for DynamicBitVector<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            packed::serialize(self, serializer)
        }
    }
}

impl<'de, P: GrowthPolicy> Deserialize<'de> for DynamicBitVector<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(BitStringVisitor(PhantomData))
        } else {
            packed::deserialize(deserializer)
        }
    }
}

/// Serialize a [`DynamicBitVector`] as a `(len, bytes)` tuple in every
/// format.
///
/// The bytes are `ceil(len / 8)` long with the unused bits of the last byte
/// cleared. Human-readable formats carry them as base64 text, which is far
/// more compact than the default bit string for long vectors.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use smol_bitset::{DynamicBitVector, bitvector};
///
/// #[derive(Serialize, Deserialize)]
/// struct Filter {
///     #[serde(with = "smol_bitset::serde::packed")]
///     bits: DynamicBitVector,
/// }
///
/// let filter = Filter { bits: bitvector![1, 0, 1, 1, 0] };
/// let json = serde_json::to_string(&filter)?;
/// assert_eq!(json, r#"{"bits":[5,"sA=="]}"#);
///
/// let back: Filter = serde_json::from_str(&json)?;
/// assert_eq!(back.bits, filter.bits);
/// # Ok::<(), serde_json::Error>(())
/// ```
pub mod packed {
    use super::*;

    /// Serialize the vector as a `(len, bytes)` tuple.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<P, S>(bits: &DynamicBitVector<P>, serializer: S) -> Result<S::Ok, S::Error>
    where
        P: GrowthPolicy,
        S: Serializer,
    {
        let mut bytes = bits.as_bytes().to_vec();
        storage::clear_tail(&mut bytes, bits.len());

        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&(bits.len() as u64))?;
        tuple.serialize_element(&Payload(&bytes))?;
        tuple.end()
    }

    /// Deserialize a vector from a `(len, bytes)` tuple.
    ///
    /// # Errors
    ///
    /// Returns an error if the length exceeds `P::MAX_BITS` or the byte count
    /// is not `ceil(len / 8)`.
    pub fn deserialize<'de, P, D>(deserializer: D) -> Result<DynamicBitVector<P>, D::Error>
    where
        P: GrowthPolicy,
        D: Deserializer<'de>,
    {
        struct PackedVisitor<P>(PhantomData<fn() -> P>);

        impl<'de, P: GrowthPolicy> Visitor<'de> for PackedVisitor<P> {
            type Value = DynamicBitVector<P>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a (length, bytes) pair")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let len: u64 = seq
                    .next_element()?
                    .ok_or_else(|| <A::Error as de::Error>::invalid_length(0, &self))?;
                let PayloadBuf(mut bytes) = seq
                    .next_element()?
                    .ok_or_else(|| <A::Error as de::Error>::invalid_length(1, &self))?;

                let len = usize::try_from(len)
                    .ok()
                    .filter(|&n| n <= P::MAX_BITS)
                    .ok_or_else(|| {
                        <A::Error as de::Error>::invalid_value(
                            de::Unexpected::Unsigned(len),
                            &"a bit length within the maximum",
                        )
                    })?;
                if bytes.len() != bytes_for(len) {
                    return Err(de::Error::invalid_length(
                        bytes.len(),
                        &ByteCount(bytes_for(len)),
                    ));
                }
                storage::clear_tail(&mut bytes, len);

                Ok(DynamicBitVector {
                    bytes,
                    len,
                    _policy: PhantomData,
                })
            }
        }

        deserializer.deserialize_tuple(2, PackedVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DefaultGrowth, bitvector};
    use serde_test::{
        Compact, Configure, Readable, Token, assert_de_tokens, assert_de_tokens_error,
        assert_tokens,
    };

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct PackedWrapper {
        #[serde(with = "packed")]
        bits: DynamicBitVector,
    }

    // ========================================================================
    // FixedBitSet
    // ========================================================================

    #[test]
    fn test_fixed_readable() {
        let bits: FixedBitSet!(5) = "10110".parse().unwrap();
        assert_tokens(&bits.readable(), &[Token::Str("10110")]);
    }

    #[test]
    fn test_fixed_compact() {
        let bits: FixedBitSet!(12) = "101100000001".parse().unwrap();
        assert_tokens(&bits.compact(), &[Token::Bytes(&[0xb0, 0x10])]);
    }

    #[test]
    fn test_fixed_compact_masks_tail() {
        let bits: FixedBitSet!(4) = "1111".parse().unwrap();
        assert_de_tokens(&bits.compact(), &[Token::Bytes(&[0xff])]);
        assert_de_tokens(&bits.compact(), &[Token::ByteBuf(&[0xf7])]);
    }

    #[test]
    fn test_fixed_errors() {
        assert_de_tokens_error::<Compact<FixedBitSet!(4)>>(
            &[Token::Bytes(&[0, 0])],
            "invalid length 2, expected 1 bytes",
        );
        assert_de_tokens_error::<Readable<FixedBitSet!(4)>>(
            &[Token::Str("101")],
            "expected 4 bits, found 3",
        );
        assert_de_tokens_error::<Readable<FixedBitSet!(2)>>(
            &[Token::Str("1a")],
            "invalid character 'a' at position 1 in bit string",
        );
    }

    #[test]
    fn test_fixed_json() {
        let bits: FixedBitSet!(9) = FixedBitSet::from(0x101u16);
        let json = serde_json::to_string(&bits).unwrap();
        assert_eq!(json, r#""100000001""#);
        let back: FixedBitSet!(9) = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bits);
    }

    // ========================================================================
    // DynamicBitVector
    // ========================================================================

    #[test]
    fn test_dynamic_readable() {
        let bits = bitvector![1, 0, 1, 1, 0];
        assert_tokens(&bits.readable(), &[Token::Str("10110")]);
        assert_tokens(&DynamicBitVector::new().readable(), &[Token::Str("")]);
    }

    #[test]
    fn test_dynamic_compact() {
        // Stale bits past the length must not leak into the output.
        let mut bits = bitvector![true; 8];
        bits.resize(5, false).unwrap();
        bits.reset(1).unwrap();
        bits.reset(4).unwrap();
        assert_tokens(
            &bits.compact(),
            &[
                Token::Tuple { len: 2 },
                Token::U64(5),
                Token::Bytes(&[0xb0]),
                Token::TupleEnd,
            ],
        );
    }

    #[test]
    fn test_dynamic_compact_byte_seq() {
        let bits = bitvector![0, 1];
        assert_de_tokens(
            &bits.compact(),
            &[
                Token::Tuple { len: 2 },
                Token::U64(2),
                Token::Seq { len: Some(1) },
                Token::U8(0x40),
                Token::SeqEnd,
                Token::TupleEnd,
            ],
        );
    }

    #[test]
    fn test_dynamic_compact_errors() {
        assert_de_tokens_error::<Compact<DynamicBitVector>>(
            &[
                Token::Tuple { len: 2 },
                Token::U64(9),
                Token::Bytes(&[0xff]),
                Token::TupleEnd,
            ],
            "invalid length 1, expected 2 bytes",
        );
        assert_de_tokens_error::<Compact<DynamicBitVector<DefaultGrowth>>>(
            &[
                Token::Tuple { len: 2 },
                Token::U64(u64::MAX),
                Token::Bytes(&[]),
                Token::TupleEnd,
            ],
            "invalid value: integer `18446744073709551615`, expected a bit length within the maximum",
        );
    }

    #[test]
    fn test_packed_json() {
        let wrapper = PackedWrapper {
            bits: bitvector![1, 0, 1, 1, 0],
        };
        let json = serde_json::to_string(&wrapper).unwrap();
        assert_eq!(json, r#"{"bits":[5,"sA=="]}"#);
        let back: PackedWrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wrapper);

        let err = serde_json::from_str::<PackedWrapper>(r#"{"bits":[5,"!!"]}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_postcard_round_trip() {
        let fixed: FixedBitSet!(20) = FixedBitSet::from(0x8_0021u32);
        let encoded = postcard::to_allocvec(&fixed).unwrap();
        assert_eq!(encoded, [3, 0x84, 0x00, 0x10]);
        let back: FixedBitSet!(20) = postcard::from_bytes(&encoded).unwrap();
        assert_eq!(back, fixed);

        let bits = bitvector![1, 0, 1, 1, 0];
        let encoded = postcard::to_allocvec(&bits).unwrap();
        assert_eq!(encoded, [5, 1, 0xb0]);
        let back: DynamicBitVector = postcard::from_bytes(&encoded).unwrap();
        assert_eq!(back, bits);

        // The packed form is the same tuple in binary formats
        let wrapper = PackedWrapper { bits };
        assert_eq!(postcard::to_allocvec(&wrapper).unwrap(), encoded);
    }

    #[test]
    fn test_dynamic_json_large() {
        let bits: DynamicBitVector = (0..300).map(|i| i % 7 == 0).collect();
        let json = serde_json::to_string(&bits).unwrap();
        assert_eq!(json.len(), 302);
        let back: DynamicBitVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bits);
    }
}
