//! Standard trait and operator implementations for the bit containers.

use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::{
        BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Index, Not, Shl,
        ShlAssign, Shr, ShrAssign,
    },
    str::FromStr,
};

use crate::{
    DynamicBitVector, Error, FixedBitSet, GrowthPolicy, ParseBitsError,
    storage::{self, bytes_for, tail_mask},
};

/// Hashes the length and the first `len` bits, ignoring anything past them.
fn hash_bits<H: Hasher>(bytes: &[u8], len: usize, state: &mut H) {
    state.write_usize(len);
    let used = bytes_for(len);
    for (j, &byte) in bytes[..used].iter().enumerate() {
        let byte = if j + 1 == used { byte & tail_mask(len) } else { byte };
        state.write_u8(byte);
    }
}

fn write_debug(
    f: &mut fmt::Formatter<'_>,
    name: fmt::Arguments<'_>,
    bytes: &[u8],
    len: usize,
) -> fmt::Result {
    write!(f, "{name}(")?;
    storage::write_bits(f, bytes, len)?;
    f.write_str(")")
}

fn write_binary(f: &mut fmt::Formatter<'_>, bytes: &[u8], len: usize) -> fmt::Result {
    if f.alternate() {
        f.write_str("0b")?;
    }
    storage::write_bits(f, bytes, len)
}

/// Extracts the bits as an integer of width `max`.
fn to_int(bytes: &[u8], len: usize, max: usize) -> Result<u128, Error> {
    let bits = storage::bit_width(bytes, len);
    if bits > max {
        return Err(Error::Overflow { bits, max });
    }
    Ok(storage::store_value(bytes, len))
}

// ============================================================================
// FixedBitSet
// ============================================================================

impl<const N: usize, const B: usize> Default for FixedBitSet<N, B> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, const B: usize> fmt::Display for FixedBitSet<N, B> {
    /// Renders the `N` bits as `'0'`/`'1'`, index 0 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        storage::write_bits(f, &self.bytes, N)
    }
}

impl<const N: usize, const B: usize> fmt::Binary for FixedBitSet<N, B> {
    /// Same as [`Display`](fmt::Display), with a `0b` prefix in alternate
    /// mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitset::FixedBitSet;
    ///
    /// let bits: FixedBitSet!(3) = FixedBitSet::from(1u8);
    /// assert_eq!(format!("{bits:#b}"), "0b100");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_binary(f, &self.bytes, N)
    }
}

impl<const N: usize, const B: usize> fmt::Debug for FixedBitSet<N, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_debug(f, format_args!("FixedBitSet<{N}>"), &self.bytes, N)
    }
}

impl<const N: usize, const B: usize> FromStr for FixedBitSet<N, B> {
    type Err = ParseBitsError;

    /// Parses exactly `N` characters of `'0'`/`'1'`, index 0 first.
    ///
    /// # Errors
    ///
    /// Returns [`ParseBitsError::WrongLength`] if the string does not hold
    /// exactly `N` characters, or [`ParseBitsError::InvalidChar`] on any
    /// other character.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitset::{FixedBitSet, ParseBitsError};
    ///
    /// let bits: FixedBitSet!(4) = "0110".parse()?;
    /// assert_eq!(bits.ones().collect::<Vec<_>>(), [1, 2]);
    ///
    /// let err = "011".parse::<FixedBitSet!(4)>().unwrap_err();
    /// assert_eq!(err, ParseBitsError::WrongLength { expected: 4, actual: 3 });
    /// # Ok::<(), ParseBitsError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actual = s.chars().count();
        if actual != N {
            return Err(ParseBitsError::WrongLength { expected: N, actual });
        }
        let mut set = Self::new();
        for (i, bit) in storage::parse_bits(s).enumerate() {
            storage::put(&mut set.bytes, i, bit?);
        }
        Ok(set)
    }
}

impl<const N: usize, const B: usize, const M: usize, const C: usize> PartialEq<FixedBitSet<M, C>>
    for FixedBitSet<N, B>
{
    /// Sets of different sizes are never equal.
    fn eq(&self, other: &FixedBitSet<M, C>) -> bool {
        N == M && storage::eq_bits(&self.bytes, &other.bytes, N)
    }
}

impl<const N: usize, const B: usize> Eq for FixedBitSet<N, B> {}

impl<const N: usize, const B: usize> Hash for FixedBitSet<N, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bits(&self.bytes, N, state);
    }
}

impl<const N: usize, const B: usize> Index<usize> for FixedBitSet<N, B> {
    type Output = bool;

    /// # Panics
    ///
    /// Panics if `index >= N`.
    fn index(&self, index: usize) -> &Self::Output {
        match self.test(index) {
            Ok(true) => &true,
            Ok(false) => &false,
            Err(err) => panic!("{err}"),
        }
    }
}

macro_rules! impl_fixed_bitop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $f:expr) => {
        impl<const N: usize, const B: usize> $OpAssign<&Self> for FixedBitSet<N, B> {
            #[inline]
            fn $op_assign(&mut self, rhs: &Self) {
                let f: fn(u8, u8) -> u8 = $f;
                for (dst, &src) in self.bytes.iter_mut().zip(&rhs.bytes) {
                    *dst = f(*dst, src);
                }
            }
        }

        impl<const N: usize, const B: usize> $OpAssign for FixedBitSet<N, B> {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                self.$op_assign(&rhs);
            }
        }

        impl<const N: usize, const B: usize> $Op for FixedBitSet<N, B> {
            type Output = Self;

            #[inline]
            fn $op(mut self, rhs: Self) -> Self::Output {
                self.$op_assign(&rhs);
                self
            }
        }

        impl<const N: usize, const B: usize> $Op for &FixedBitSet<N, B> {
            type Output = FixedBitSet<N, B>;

            #[inline]
            fn $op(self, rhs: Self) -> Self::Output {
                let mut out = *self;
                out.$op_assign(rhs);
                out
            }
        }
    };
}

impl_fixed_bitop!(BitAnd, bitand, BitAndAssign, bitand_assign, |a, b| a & b);
impl_fixed_bitop!(BitOr, bitor, BitOrAssign, bitor_assign, |a, b| a | b);
impl_fixed_bitop!(BitXor, bitxor, BitXorAssign, bitxor_assign, |a, b| a ^ b);

impl<const N: usize, const B: usize> Not for FixedBitSet<N, B> {
    type Output = Self;

    #[inline]
    fn not(mut self) -> Self::Output {
        self.flip_all();
        self
    }
}

impl<const N: usize, const B: usize> Not for &FixedBitSet<N, B> {
    type Output = FixedBitSet<N, B>;

    #[inline]
    fn not(self) -> Self::Output {
        !*self
    }
}

impl<const N: usize, const B: usize> ShlAssign<usize> for FixedBitSet<N, B> {
    /// Moves every bit to a higher index; see
    /// [`shift_up`](FixedBitSet::shift_up).
    #[inline]
    fn shl_assign(&mut self, n: usize) {
        self.shift_up(n);
    }
}

impl<const N: usize, const B: usize> ShrAssign<usize> for FixedBitSet<N, B> {
    /// Moves every bit to a lower index; see
    /// [`shift_down`](FixedBitSet::shift_down).
    #[inline]
    fn shr_assign(&mut self, n: usize) {
        self.shift_down(n);
    }
}

impl<const N: usize, const B: usize> Shl<usize> for FixedBitSet<N, B> {
    type Output = Self;

    #[inline]
    fn shl(mut self, n: usize) -> Self::Output {
        self.shift_up(n);
        self
    }
}

impl<const N: usize, const B: usize> Shr<usize> for FixedBitSet<N, B> {
    type Output = Self;

    #[inline]
    fn shr(mut self, n: usize) -> Self::Output {
        self.shift_down(n);
        self
    }
}

// ============================================================================
// DynamicBitVector
// ============================================================================

impl<P> Default for DynamicBitVector<P> {
    #[inline]
    fn default() -> Self {
        Self {
            bytes: alloc::vec::Vec::new(),
            len: 0,
            _policy: core::marker::PhantomData,
        }
    }
}

impl<P: GrowthPolicy> fmt::Display for DynamicBitVector<P> {
    /// Renders the bits as `'0'`/`'1'`, index 0 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        storage::write_bits(f, &self.bytes, self.len)
    }
}

impl<P: GrowthPolicy> fmt::Binary for DynamicBitVector<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_binary(f, &self.bytes, self.len)
    }
}

impl<P> fmt::Debug for DynamicBitVector<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_debug(f, format_args!("DynamicBitVector"), &self.bytes, self.len)
    }
}

impl<P: GrowthPolicy> FromStr for DynamicBitVector<P> {
    type Err = ParseBitsError;

    /// Parses a string of `'0'`/`'1'`, index 0 first. The empty string yields
    /// an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`ParseBitsError::InvalidChar`] on any other character, or
    /// [`ParseBitsError::TooLong`] if the string holds more than
    /// `P::MAX_BITS` characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        let mut bits =
            Self::filled_in(len, false).map_err(|_| ParseBitsError::TooLong { max: P::MAX_BITS })?;
        for (i, bit) in storage::parse_bits(s).enumerate() {
            storage::put(&mut bits.bytes, i, bit?);
        }
        Ok(bits)
    }
}

impl<P, Q> PartialEq<DynamicBitVector<Q>> for DynamicBitVector<P> {
    /// Compares length and bits; capacity and policy are ignored.
    fn eq(&self, other: &DynamicBitVector<Q>) -> bool {
        self.len == other.len && storage::eq_bits(&self.bytes, &other.bytes, self.len)
    }
}

impl<P> Eq for DynamicBitVector<P> {}

impl<P> Hash for DynamicBitVector<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bits(&self.bytes, self.len, state);
    }
}

impl<P: GrowthPolicy> Index<usize> for DynamicBitVector<P> {
    type Output = bool;

    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn index(&self, index: usize) -> &Self::Output {
        match self.test(index) {
            Ok(true) => &true,
            Ok(false) => &false,
            Err(err) => panic!("{err}"),
        }
    }
}

macro_rules! impl_dynamic_bitop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $checked:ident) => {
        impl<P: GrowthPolicy, Q: GrowthPolicy> $OpAssign<&DynamicBitVector<Q>>
            for DynamicBitVector<P>
        {
            /// # Panics
            ///
            /// Panics if either operand is empty or the lengths differ. Use
            #[doc = concat!("[`", stringify!($checked), "`](DynamicBitVector::", stringify!($checked), ")")]
            /// to handle the mismatch as an [`Error`].
            #[inline]
            fn $op_assign(&mut self, rhs: &DynamicBitVector<Q>) {
                if let Err(err) = self.$checked(rhs) {
                    panic!("{err}");
                }
            }
        }

        impl<P: GrowthPolicy> $OpAssign for DynamicBitVector<P> {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                self.$op_assign(&rhs);
            }
        }

        impl<P: GrowthPolicy> $Op for DynamicBitVector<P> {
            type Output = Self;

            #[inline]
            fn $op(mut self, rhs: Self) -> Self::Output {
                self.$op_assign(&rhs);
                self
            }
        }

        impl<P: GrowthPolicy> $Op for &DynamicBitVector<P> {
            type Output = DynamicBitVector<P>;

            #[inline]
            fn $op(self, rhs: Self) -> Self::Output {
                let mut out = self.clone();
                out.$op_assign(rhs);
                out
            }
        }
    };
}

impl_dynamic_bitop!(BitAnd, bitand, BitAndAssign, bitand_assign, intersection_with);
impl_dynamic_bitop!(BitOr, bitor, BitOrAssign, bitor_assign, union_with);
impl_dynamic_bitop!(BitXor, bitxor, BitXorAssign, bitxor_assign, symmetric_difference_with);

impl<P: GrowthPolicy> Not for DynamicBitVector<P> {
    type Output = Self;

    /// Inverts every bit. An empty vector stays empty.
    #[inline]
    fn not(mut self) -> Self::Output {
        let used = bytes_for(self.len);
        for byte in &mut self.bytes[..used] {
            *byte = !*byte;
        }
        self
    }
}

impl<P: GrowthPolicy> Not for &DynamicBitVector<P> {
    type Output = DynamicBitVector<P>;

    #[inline]
    fn not(self) -> Self::Output {
        !self.clone()
    }
}

impl<P: GrowthPolicy> ShlAssign<usize> for DynamicBitVector<P> {
    #[inline]
    fn shl_assign(&mut self, n: usize) {
        self.shift_up(n);
    }
}

impl<P: GrowthPolicy> ShrAssign<usize> for DynamicBitVector<P> {
    #[inline]
    fn shr_assign(&mut self, n: usize) {
        self.shift_down(n);
    }
}

impl<P: GrowthPolicy> Shl<usize> for DynamicBitVector<P> {
    type Output = Self;

    #[inline]
    fn shl(mut self, n: usize) -> Self::Output {
        self.shift_up(n);
        self
    }
}

impl<P: GrowthPolicy> Shr<usize> for DynamicBitVector<P> {
    type Output = Self;

    #[inline]
    fn shr(mut self, n: usize) -> Self::Output {
        self.shift_down(n);
        self
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl<const N: usize, const B: usize> From<FixedBitSet<N, B>> for DynamicBitVector {
    /// Copies the bits into a vector of length `N` with a tight capacity.
    fn from(set: FixedBitSet<N, B>) -> Self {
        Self {
            bytes: set.bytes.to_vec(),
            len: N,
            _policy: core::marker::PhantomData,
        }
    }
}

impl<const N: usize, const B: usize, P> PartialEq<DynamicBitVector<P>> for FixedBitSet<N, B> {
    fn eq(&self, other: &DynamicBitVector<P>) -> bool {
        N == other.len && storage::eq_bits(&self.bytes, &other.bytes, N)
    }
}

impl<const N: usize, const B: usize, P> PartialEq<FixedBitSet<N, B>> for DynamicBitVector<P> {
    fn eq(&self, other: &FixedBitSet<N, B>) -> bool {
        other == self
    }
}

macro_rules! impl_int_conversions {
    ($($t:ty),* $(,)?) => {$(
        impl<const N: usize, const B: usize> From<$t> for FixedBitSet<N, B> {
            /// Bit `i` of the value becomes bit index `i`; value bits at or
            /// beyond `N` are discarded.
            #[inline]
            fn from(value: $t) -> Self {
                Self::from_value(value as u128)
            }
        }

        impl<const N: usize, const B: usize> TryFrom<&FixedBitSet<N, B>> for $t {
            type Error = Error;

            /// Reads the bits back as an integer, bit index `i` becoming
            /// value bit `i`.
            ///
            /// # Errors
            ///
            /// Returns [`Error::Overflow`] if a set bit does not fit in the
            /// target type.
            fn try_from(set: &FixedBitSet<N, B>) -> Result<Self, Self::Error> {
                to_int(&set.bytes, N, <$t>::BITS as usize).map(|v| v as $t)
            }
        }

        impl<P: GrowthPolicy> TryFrom<&DynamicBitVector<P>> for $t {
            type Error = Error;

            /// Reads the bits back as an integer, bit index `i` becoming
            /// value bit `i`.
            ///
            /// # Errors
            ///
            /// Returns [`Error::Overflow`] if a set bit does not fit in the
            /// target type.
            fn try_from(bits: &DynamicBitVector<P>) -> Result<Self, Self::Error> {
                to_int(&bits.bytes, bits.len, <$t>::BITS as usize).map(|v| v as $t)
            }
        }
    )*};
}

impl_int_conversions!(u8, u16, u32, u64, u128, usize);
