//! `FixedBitSet` struct and core implementation.

use crate::{
    BitRef, Error,
    iter::{Iter, Ones},
    storage::{self, bytes_for},
};

/// A set of exactly `N` bits stored inline in `B = ceil(N / 8)` bytes.
///
/// # Overview
///
/// `FixedBitSet` never allocates. Its length is part of the type, so binary
/// operators between two sets can only be written for equal sizes, and
/// comparing sets of different sizes is simply `false`.
///
/// Spell the type with the [`FixedBitSet!`](crate::FixedBitSet!) macro, which
/// computes `B` from `N`. Constructing a set whose `B` does not match `N` fails
/// to compile.
///
/// # Layout
///
/// Bit `i` lives in byte `i / 8`, and the most significant bit of each byte
/// holds the lowest index. Bits of the final byte beyond `N` are always zero.
///
/// # Examples
///
/// ```
/// use smol_bitset::FixedBitSet;
///
/// let mut bits: FixedBitSet!(16) = FixedBitSet::from(0xffffu16);
/// assert_eq!(bits.to_string(), "1111111111111111");
///
/// bits.reset(0)?;
/// bits >>= 4;
/// assert_eq!(bits.count(), 12);
/// assert!(bits.set(16, true).is_err());
/// # Ok::<(), smol_bitset::Error>(())
/// ```
#[derive(Clone, Copy)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize),
    rkyv(bytecheck(verify))
)]
pub struct FixedBitSet<const N: usize, const B: usize> {
    pub(crate) bytes: [u8; B],
}

impl<const N: usize, const B: usize> FixedBitSet<N, B> {
    const LAYOUT: () = assert!(
        B == bytes_for(N),
        "FixedBitSet<N, B> requires B == ceil(N / 8); name the type with FixedBitSet!(N)"
    );

    /// Creates a set with every bit cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitset::FixedBitSet;
    ///
    /// let bits: FixedBitSet!(10) = FixedBitSet::new();
    /// assert!(bits.none());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        let () = Self::LAYOUT;
        Self { bytes: [0; B] }
    }

    /// Creates a set whose low bits come from `value`: bit `i` of the value
    /// becomes bit index `i`. Value bits at or beyond `N` are discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitset::FixedBitSet;
    ///
    /// let bits: FixedBitSet!(4) = FixedBitSet::from_value(0b0110);
    /// assert_eq!(bits.to_string(), "0110");
    /// let bits: FixedBitSet!(4) = FixedBitSet::from_value(0b0001);
    /// assert_eq!(bits.to_string(), "1000");
    /// ```
    #[must_use]
    pub fn from_value(value: u128) -> Self {
        let mut set = Self::new();
        storage::load_value(&mut set.bytes, N, value);
        set
    }

    /// Creates a set from its raw byte representation. Bits of the final byte
    /// beyond `N` are cleared.
    #[must_use]
    pub fn from_bytes(bytes: [u8; B]) -> Self {
        let mut set = Self::new();
        set.bytes = bytes;
        storage::clear_tail(&mut set.bytes, N);
        set
    }

    /// Returns the number of bits, `N`.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns `true` if the set holds zero bits.
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Returns the raw bytes backing the set.
    #[must_use]
    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8; B] {
        &self.bytes
    }

    #[inline(always)]
    fn check(&self, index: usize) -> Result<(), Error> {
        if index < N {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { index, len: N })
        }
    }

    /// Returns the bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= N`.
    #[inline]
    pub fn test(&self, index: usize) -> Result<bool, Error> {
        self.check(index)?;
        Ok(storage::get(&self.bytes, index))
    }

    /// Returns the bit at `index`, or `None` if out of range.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.test(index).ok()
    }

    /// Returns a mutable proxy for the bit at `index`, or `None` if out of
    /// range.
    #[must_use]
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<BitRef<'_>> {
        if index < N {
            Some(BitRef::new(&mut self.bytes, index))
        } else {
            None
        }
    }

    /// Writes `value` into the bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= N`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) -> Result<(), Error> {
        self.check(index)?;
        storage::put(&mut self.bytes, index, value);
        Ok(())
    }

    /// Clears the bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= N`.
    #[inline]
    pub fn reset(&mut self, index: usize) -> Result<(), Error> {
        self.set(index, false)
    }

    /// Inverts the bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= N`.
    #[inline]
    pub fn flip(&mut self, index: usize) -> Result<(), Error> {
        self.check(index)?;
        storage::toggle(&mut self.bytes, index);
        Ok(())
    }

    /// Exchanges the bits at `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if either index is `>= N`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), Error> {
        let (va, vb) = (self.test(a)?, self.test(b)?);
        storage::put(&mut self.bytes, a, vb);
        storage::put(&mut self.bytes, b, va);
        Ok(())
    }

    /// Sets every bit.
    pub fn set_all(&mut self) {
        self.bytes.fill(0xff);
        storage::clear_tail(&mut self.bytes, N);
    }

    /// Clears every bit.
    pub fn reset_all(&mut self) {
        self.bytes.fill(0);
    }

    /// Inverts every bit.
    pub fn flip_all(&mut self) {
        for byte in &mut self.bytes {
            *byte = !*byte;
        }
        storage::clear_tail(&mut self.bytes, N);
    }

    /// Returns the number of set bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitset::FixedBitSet;
    ///
    /// let bits: FixedBitSet!(70) = FixedBitSet::from_value(0b1011);
    /// assert_eq!(bits.count(), 3);
    /// ```
    #[must_use]
    pub fn count(&self) -> usize {
        storage::count_ones(&self.bytes, N)
    }

    /// Returns `true` if every bit is set. Vacuously true when `N == 0`.
    #[must_use]
    pub fn all(&self) -> bool {
        self.count() == N
    }

    /// Returns `true` if at least one bit is set.
    #[must_use]
    pub fn any(&self) -> bool {
        storage::any(&self.bytes, N)
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Moves every bit to a higher index by `n`, zero-filling the low end.
    pub fn shift_up(&mut self, n: usize) {
        storage::shift_up(&mut self.bytes, N, n);
    }

    /// Moves every bit to a lower index by `n`, zero-filling the high end.
    pub fn shift_down(&mut self, n: usize) {
        storage::shift_down(&mut self.bytes, N, n);
    }

    /// Returns an iterator over every bit, index 0 first.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.bytes, N)
    }

    /// Returns an iterator over the indices of the set bits.
    #[must_use]
    pub fn ones(&self) -> Ones<'_> {
        Ones::new(&self.bytes, N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, FixedBitSet};
    use alloc::{string::ToString, vec::Vec};

    #[test]
    fn test_new_is_zeroed() {
        let bits: FixedBitSet!(13) = FixedBitSet::new();
        assert_eq!(bits.len(), 13);
        assert_eq!(bits.as_bytes(), &[0, 0]);
        assert!(bits.none());
        assert!(!bits.all());
    }

    #[test]
    fn test_from_all_ones_u16() {
        let bits: FixedBitSet!(16) = FixedBitSet::from(0xffffu16);
        assert_eq!(bits.to_string(), "1111111111111111");
        assert!(bits.all());
    }

    #[test]
    fn test_from_value_truncates() {
        let bits: FixedBitSet!(6) = FixedBitSet::from_value(0xff);
        assert_eq!(bits.count(), 6);
        assert_eq!(bits.as_bytes(), &[0xfc]);
    }

    #[test]
    fn test_single_bit_ops() {
        let mut bits: FixedBitSet!(10) = FixedBitSet::new();
        bits.set(9, true).unwrap();
        bits.flip(2).unwrap();
        assert_eq!(bits.to_string(), "0010000001");
        bits.reset(9).unwrap();
        assert_eq!(bits.test(9), Ok(false));
        assert_eq!(bits.test(2), Ok(true));
    }

    #[test]
    fn test_out_of_range() {
        let mut bits: FixedBitSet!(10) = FixedBitSet::new();
        let err = bits.set(10, true).unwrap_err();
        assert_eq!(err, Error::IndexOutOfRange { index: 10, len: 10 });
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(bits.reset(11).is_err());
        assert!(bits.flip(100).is_err());
        assert!(bits.test(10).is_err());
        assert_eq!(bits.get(10), None);
        assert!(bits.get_mut(10).is_none());
    }

    #[test]
    fn test_whole_set_ops_keep_tail_clear() {
        let mut bits: FixedBitSet!(11) = FixedBitSet::new();
        bits.set_all();
        assert_eq!(bits.as_bytes(), &[0xff, 0xe0]);
        assert!(bits.all());

        bits.reset(0).unwrap();
        bits.flip_all();
        assert_eq!(bits.as_bytes(), &[0x80, 0x00]);
        assert_eq!(bits.count(), 1);

        bits.reset_all();
        assert!(bits.none());
    }

    #[test]
    fn test_count_any_none_all_consistency() {
        let patterns = [0u128, 1, 0x80, 0x7ff, 0x555, 0x400];
        for value in patterns {
            let bits: FixedBitSet!(11) = FixedBitSet::from_value(value);
            assert_eq!(bits.any(), bits.count() > 0);
            assert_eq!(bits.none(), !bits.any());
            assert_eq!(bits.all(), bits.count() == bits.len());
        }
    }

    #[test]
    fn test_shift_fully_set() {
        for k in 0..20 {
            let mut bits: FixedBitSet!(13) = FixedBitSet::new();
            bits.set_all();
            bits >>= k;
            assert_eq!(bits.count(), 13usize.saturating_sub(k), "shift {k}");
            for i in 13usize.saturating_sub(k)..13 {
                assert_eq!(bits.get(i), Some(false));
            }
        }
    }

    #[test]
    fn test_shift_up_moves_to_higher_index() {
        let mut bits: FixedBitSet!(9) = FixedBitSet::from_value(0b11);
        bits <<= 6;
        assert_eq!(bits.to_string(), "000000110");
        bits <<= 2;
        assert_eq!(bits.to_string(), "000000001");
        bits <<= 9;
        assert!(bits.none());
    }

    #[test]
    fn test_swap() {
        let mut bits: FixedBitSet!(5) = FixedBitSet::from_value(1);
        bits.swap(0, 4).unwrap();
        assert_eq!(bits.to_string(), "00001");
        assert!(bits.swap(0, 5).is_err());
    }

    #[test]
    fn test_iter_and_ones() {
        let bits: FixedBitSet!(12) = "101000000011".parse().unwrap();
        let collected: Vec<bool> = bits.iter().collect();
        assert_eq!(collected.len(), 12);
        assert!(collected[0] && collected[2] && collected[10] && collected[11]);
        let ones: Vec<usize> = bits.ones().collect();
        assert_eq!(ones, [0, 2, 10, 11]);
    }

    #[test]
    fn test_zero_sized() {
        let mut bits: FixedBitSet!(0) = FixedBitSet::new();
        assert!(bits.is_empty());
        assert!(bits.all());
        assert!(bits.none());
        bits.set_all();
        bits >>= 3;
        assert_eq!(bits.to_string(), "");
        assert!(bits.set(0, true).is_err());
    }
}
