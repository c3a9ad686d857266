//! `DynamicBitVector` struct and core implementation.

use alloc::{vec, vec::Vec};
use core::marker::PhantomData;

use crate::{
    BitRef, DefaultGrowth, Error, GrowthPolicy,
    iter::{Iter, Ones},
    macros::{debug, trace},
    storage::{self, bytes_for},
};

/// A growable sequence of bits backed by a heap byte buffer.
///
/// # Overview
///
/// `DynamicBitVector` keeps a logical bit length separate from its byte
/// capacity. [`push`](Self::push) grows the buffer on the schedule of the
/// [`GrowthPolicy`] `P`, so appending is amortized O(1). Explicit capacity
/// management is available through [`reserve`](Self::reserve),
/// [`resize`](Self::resize), [`shrink_to_fit`](Self::shrink_to_fit) and
/// [`clear`](Self::clear).
///
/// Every operation that can fail returns [`Error`]; see
/// [`Error::kind`](crate::Error::kind) for the category of each failure.
///
/// # Layout
///
/// Bit `i` lives in byte `i / 8`, and the most significant bit of each byte
/// holds the lowest index, the same layout as
/// [`FixedBitSet`](crate::FixedBitSet). Bits past the length inside the
/// allocated bytes are unspecified and never observed through the API.
///
/// # Examples
///
/// ```
/// use smol_bitset::DynamicBitVector;
///
/// let mut bits = DynamicBitVector::new();
/// for i in 0..10 {
///     bits.push(i % 3 == 0)?;
/// }
/// assert_eq!(bits.to_string(), "1001001001");
/// assert_eq!(bits.count(), 4);
///
/// bits.resize(12, true)?;
/// assert_eq!(bits.to_string(), "100100100111");
///
/// bits >>= 3;
/// assert_eq!(bits.to_string(), "100100111000");
/// # Ok::<(), smol_bitset::Error>(())
/// ```
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize),
    rkyv(bytecheck(verify))
)]
pub struct DynamicBitVector<P = DefaultGrowth> {
    /// Backing store; its length is the byte capacity.
    pub(crate) bytes: Vec<u8>,
    pub(crate) len: usize,
    pub(crate) _policy: PhantomData<fn() -> P>,
}

impl DynamicBitVector {
    /// Creates an empty vector without allocating.
    ///
    /// Use [`Default::default`] to create an empty vector with a custom
    /// growth policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            len: 0,
            _policy: PhantomData,
        }
    }

    /// Creates a vector of `len` cleared bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthExceeded`] if `len` is above the maximum bit
    /// length.
    pub fn with_len(len: usize) -> Result<Self, Error> {
        Self::filled_in(len, false)
    }

    /// Creates a vector of `len` bits, each set to `value`.
    ///
    /// Use [`filled_in`](Self::filled_in) to pick a custom growth policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthExceeded`] if `len` is above the maximum bit
    /// length.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitset::DynamicBitVector;
    ///
    /// let bits = DynamicBitVector::filled(10, true)?;
    /// assert_eq!(bits.count(), 10);
    /// assert_eq!(bits.byte_capacity(), 2);
    /// # Ok::<(), smol_bitset::Error>(())
    /// ```
    pub fn filled(len: usize, value: bool) -> Result<Self, Error> {
        Self::filled_in(len, value)
    }

    /// Creates a vector of `len` bits whose low bits come from `value`: bit
    /// `i` of the value becomes bit index `i`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthExceeded`] if `len` is above the maximum bit
    /// length.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitset::DynamicBitVector;
    ///
    /// let bits = DynamicBitVector::from_value(6, 0b100101)?;
    /// assert_eq!(bits.to_string(), "101001");
    /// # Ok::<(), smol_bitset::Error>(())
    /// ```
    pub fn from_value(len: usize, value: u128) -> Result<Self, Error> {
        let mut bits = Self::with_len(len)?;
        bits.assign_value(value);
        Ok(bits)
    }
}

impl<P: GrowthPolicy> DynamicBitVector<P> {
    /// Creates a vector of `len` bits, each set to `value`. The byte capacity
    /// is exactly `ceil(len / 8)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthExceeded`] if `len` is above `P::MAX_BITS`.
    pub fn filled_in(len: usize, value: bool) -> Result<Self, Error> {
        if len > P::MAX_BITS {
            return Err(Error::LengthExceeded {
                requested: len,
                max: P::MAX_BITS,
            });
        }
        let mut bytes = vec![if value { 0xff } else { 0 }; bytes_for(len)];
        storage::clear_tail(&mut bytes, len);
        Ok(Self {
            bytes,
            len,
            _policy: PhantomData,
        })
    }

    /// Overwrites the contents with the low bits of `value`, keeping the
    /// length. Bits at index 128 and above are cleared.
    pub fn assign_value(&mut self, value: u128) {
        let used = bytes_for(self.len);
        self.bytes[..used].fill(0);
        storage::load_value(&mut self.bytes, self.len, value);
    }

    /// Returns the number of bits.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector holds no bits.
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of bits the vector can hold without reallocating.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len().saturating_mul(8)
    }

    /// Returns the number of allocated bytes.
    #[must_use]
    #[inline]
    pub fn byte_capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the `ceil(len / 8)` bytes holding the bits. Bits of the final
    /// byte past the length are unspecified.
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..bytes_for(self.len)]
    }

    #[inline(always)]
    fn check(&self, index: usize) -> Result<(), Error> {
        if index < self.len {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    #[inline]
    fn check_nonempty(&self, op: &'static str) -> Result<(), Error> {
        if self.len == 0 {
            Err(Error::Empty { op })
        } else {
            Ok(())
        }
    }

    /// Returns the bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
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
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitset::bitvector;
    ///
    /// let mut bits = bitvector![0, 0, 0];
    /// if let Some(mut bit) = bits.get_mut(1) {
    ///     *bit = !*bit;
    /// }
    /// assert_eq!(bits.to_string(), "010");
    /// ```
    #[must_use]
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<BitRef<'_>> {
        if index < self.len {
            Some(BitRef::new(&mut self.bytes, index))
        } else {
            None
        }
    }

    /// Writes `value` into the bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
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
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    #[inline]
    pub fn reset(&mut self, index: usize) -> Result<(), Error> {
        self.set(index, false)
    }

    /// Inverts the bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
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
    /// Returns [`Error::IndexOutOfRange`] if either index is `>= len`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), Error> {
        let (va, vb) = (self.test(a)?, self.test(b)?);
        storage::put(&mut self.bytes, a, vb);
        storage::put(&mut self.bytes, b, va);
        Ok(())
    }

    /// Returns the first bit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the vector is empty.
    pub fn front(&self) -> Result<bool, Error> {
        self.check_nonempty("front")?;
        Ok(storage::get(&self.bytes, 0))
    }

    /// Returns the last bit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the vector is empty.
    pub fn back(&self) -> Result<bool, Error> {
        self.check_nonempty("back")?;
        Ok(storage::get(&self.bytes, self.len - 1))
    }

    /// Sets every bit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the vector is empty.
    pub fn set_all(&mut self) -> Result<(), Error> {
        self.check_nonempty("set_all")?;
        let used = bytes_for(self.len);
        self.bytes[..used].fill(0xff);
        Ok(())
    }

    /// Clears every bit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the vector is empty.
    pub fn reset_all(&mut self) -> Result<(), Error> {
        self.check_nonempty("reset_all")?;
        let used = bytes_for(self.len);
        self.bytes[..used].fill(0);
        Ok(())
    }

    /// Inverts every bit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the vector is empty.
    pub fn flip_all(&mut self) -> Result<(), Error> {
        self.check_nonempty("flip_all")?;
        let used = bytes_for(self.len);
        for byte in &mut self.bytes[..used] {
            *byte = !*byte;
        }
        Ok(())
    }

    /// Returns the number of set bits.
    #[must_use]
    pub fn count(&self) -> usize {
        storage::count_ones(&self.bytes, self.len)
    }

    /// Returns `true` if every bit is set. Vacuously true when empty.
    #[must_use]
    pub fn all(&self) -> bool {
        self.count() == self.len
    }

    /// Returns `true` if at least one bit is set.
    #[must_use]
    pub fn any(&self) -> bool {
        storage::any(&self.bytes, self.len)
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Appends a bit, growing the buffer when it is full.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthExceeded`] if the vector already holds
    /// `P::MAX_BITS` bits, or [`Error::CapacityExceeded`] if the growth policy
    /// cannot provide more room. The vector is unchanged on error.
    pub fn push(&mut self, value: bool) -> Result<(), Error> {
        if self.len >= P::MAX_BITS {
            return Err(Error::LengthExceeded {
                requested: self.len.saturating_add(1),
                max: P::MAX_BITS,
            });
        }
        if self.len == self.capacity() {
            self.grow()?;
        }
        storage::put(&mut self.bytes, self.len, value);
        self.len += 1;
        Ok(())
    }

    /// Removes the last bit and returns it. The storage is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the vector is empty.
    pub fn pop(&mut self) -> Result<bool, Error> {
        self.check_nonempty("pop")?;
        self.len -= 1;
        Ok(storage::get(&self.bytes, self.len))
    }

    fn grow(&mut self) -> Result<(), Error> {
        let from = self.bytes.len();
        let to = P::next_capacity(from);
        if to <= from {
            return Err(Error::CapacityExceeded {
                requested: from.saturating_add(1),
                max: P::MAX_BYTES,
            });
        }
        trace!(from, to, len = self.len, "growing bit vector");
        self.bytes.reserve_exact(to - from);
        self.bytes.resize(to, 0);
        Ok(())
    }

    /// Grows the byte capacity by exactly `extra_bytes`.
    ///
    /// A zero request, or any request once the capacity is at
    /// `P::MAX_BYTES`, does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if the new capacity would exceed
    /// `P::MAX_BYTES`.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitset::DynamicBitVector;
    ///
    /// let mut bits = DynamicBitVector::new();
    /// bits.reserve(3)?;
    /// bits.reserve(2)?;
    /// assert_eq!(bits.byte_capacity(), 5);
    /// assert_eq!(bits.capacity(), 40);
    /// assert!(bits.is_empty());
    /// # Ok::<(), smol_bitset::Error>(())
    /// ```
    pub fn reserve(&mut self, extra_bytes: usize) -> Result<(), Error> {
        let from = self.bytes.len();
        if extra_bytes == 0 || from >= P::MAX_BYTES {
            return Ok(());
        }
        let to = from.saturating_add(extra_bytes);
        if to > P::MAX_BYTES {
            return Err(Error::CapacityExceeded {
                requested: to,
                max: P::MAX_BYTES,
            });
        }
        debug!(from, to, len = self.len, "reserving bit vector storage");
        self.bytes.reserve_exact(extra_bytes);
        self.bytes.resize(to, 0);
        Ok(())
    }

    /// Changes the length to `new_len`, writing `fill` into every newly
    /// exposed bit. Shrinking keeps the capacity. `resize(0, _)` is
    /// [`clear`](Self::clear).
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthExceeded`] if `new_len` is above `P::MAX_BITS`.
    pub fn resize(&mut self, new_len: usize, fill: bool) -> Result<(), Error> {
        if new_len == 0 {
            self.clear();
            return Ok(());
        }
        if new_len > P::MAX_BITS {
            return Err(Error::LengthExceeded {
                requested: new_len,
                max: P::MAX_BITS,
            });
        }

        let needed = bytes_for(new_len);
        let from = self.bytes.len();
        if needed > from {
            debug!(from, to = needed, len = new_len, "resizing bit vector storage");
            self.bytes.reserve_exact(needed - from);
            self.bytes.resize(needed, 0);
        }
        if new_len > self.len {
            storage::fill_range(&mut self.bytes, self.len, new_len, fill);
        }
        self.len = new_len;
        Ok(())
    }

    /// Reduces the byte capacity to exactly `ceil(len / 8)`, releasing the
    /// storage entirely when empty.
    pub fn shrink_to_fit(&mut self) {
        if self.len == 0 {
            self.clear();
            return;
        }
        let from = self.bytes.len();
        let to = bytes_for(self.len);
        if from > to {
            debug!(from, to, len = self.len, "shrinking bit vector storage");
            self.bytes.truncate(to);
            self.bytes.shrink_to_fit();
        }
    }

    /// Removes every bit and releases the storage.
    pub fn clear(&mut self) {
        if !self.bytes.is_empty() {
            debug!(from = self.bytes.len(), to = 0usize, len = 0usize, "releasing bit vector storage");
        }
        self.bytes = Vec::new();
        self.len = 0;
    }

    /// Moves every bit to a higher index by `n`, zero-filling the low end.
    /// The length is unchanged.
    pub fn shift_up(&mut self, n: usize) {
        storage::shift_up(&mut self.bytes, self.len, n);
    }

    /// Moves every bit to a lower index by `n`, zero-filling the high end.
    /// The length is unchanged.
    pub fn shift_down(&mut self, n: usize) {
        storage::shift_down(&mut self.bytes, self.len, n);
    }

    fn check_operand<Q: GrowthPolicy>(&self, other: &DynamicBitVector<Q>) -> Result<usize, Error> {
        if self.len == 0 || other.len == 0 {
            return Err(Error::EmptyOperand);
        }
        if self.len != other.len {
            return Err(Error::LengthMismatch {
                lhs: self.len,
                rhs: other.len,
            });
        }
        Ok(bytes_for(self.len))
    }

    fn zip_with<Q: GrowthPolicy>(
        &mut self,
        other: &DynamicBitVector<Q>,
        op: impl Fn(u8, u8) -> u8,
    ) -> Result<(), Error> {
        let used = self.check_operand(other)?;
        for (dst, &src) in self.bytes[..used].iter_mut().zip(&other.bytes[..used]) {
            *dst = op(*dst, src);
        }
        Ok(())
    }

    /// Sets each bit to the OR of itself and the matching bit of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyOperand`] if either vector is empty, or
    /// [`Error::LengthMismatch`] if the lengths differ. `self` is unchanged on
    /// error.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitset::{ErrorKind, bitvector};
    ///
    /// let mut a = bitvector![1, 0, 0, 1];
    /// a.union_with(&bitvector![0, 1, 0, 1])?;
    /// assert_eq!(a.to_string(), "1101");
    ///
    /// let err = a.union_with(&bitvector![1, 1]).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    /// # Ok::<(), smol_bitset::Error>(())
    /// ```
    pub fn union_with<Q: GrowthPolicy>(&mut self, other: &DynamicBitVector<Q>) -> Result<(), Error> {
        self.zip_with(other, |a, b| a | b)
    }

    /// Sets each bit to the AND of itself and the matching bit of `other`.
    ///
    /// # Errors
    ///
    /// Same as [`union_with`](Self::union_with).
    pub fn intersection_with<Q: GrowthPolicy>(
        &mut self,
        other: &DynamicBitVector<Q>,
    ) -> Result<(), Error> {
        self.zip_with(other, |a, b| a & b)
    }

    /// Sets each bit to the XOR of itself and the matching bit of `other`.
    ///
    /// # Errors
    ///
    /// Same as [`union_with`](Self::union_with).
    pub fn symmetric_difference_with<Q: GrowthPolicy>(
        &mut self,
        other: &DynamicBitVector<Q>,
    ) -> Result<(), Error> {
        self.zip_with(other, |a, b| a ^ b)
    }

    /// Returns an iterator over every bit, index 0 first.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.bytes, self.len)
    }

    /// Returns an iterator over the indices of the set bits.
    #[must_use]
    pub fn ones(&self) -> Ones<'_> {
        Ones::new(&self.bytes, self.len)
    }
}

impl<P> Clone for DynamicBitVector<P> {
    /// Copies the whole buffer, so the clone has the same byte capacity.
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            len: self.len,
            _policy: PhantomData,
        }
    }
}
