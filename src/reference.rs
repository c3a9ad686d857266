//! Proxy reference for a single bit.
//!
//! A bit has no address of its own, so `&mut bool` cannot point into a byte
//! buffer. [`BitRef`] stands in for it: it borrows the byte that holds the
//! bit, caches the bit's value, and commits the cache back when dropped.

use core::{
    fmt,
    mem,
    ops::{Deref, DerefMut},
};

use crate::storage::bitpos;

/// Mutable handle to one bit of a container, equivalent to `&mut bool`.
///
/// Obtained from `get_mut` on either container. Reads and writes go through
/// [`Deref`]/[`DerefMut`] to a cached `bool`; the cached value is written to
/// the container when the handle is dropped. [`set`](Self::set) writes
/// immediately and consumes the handle.
///
/// The handle mutably borrows its container, so the container cannot be
/// resized or reallocated while it is alive.
///
/// Two handles compare equal when the bits they refer to hold the same
/// value, regardless of which container or position they come from.
///
/// # Examples
///
/// ```
/// use smol_bitset::FixedBitSet;
///
/// let mut bits: FixedBitSet!(8) = FixedBitSet::new();
/// if let Some(mut bit) = bits.get_mut(3) {
///     *bit = true;
/// }
/// assert_eq!(bits.to_string(), "00010000");
///
/// bits.get_mut(0).unwrap().set(true);
/// assert_eq!(bits.to_string(), "10010000");
/// ```
pub struct BitRef<'a> {
    byte: &'a mut u8,
    mask: u8,
    /// Local cache for [`Deref`] usage.
    value: bool,
}

impl<'a> BitRef<'a> {
    /// Creates a proxy for bit `idx` of `bytes`.
    pub(crate) fn new(bytes: &'a mut [u8], idx: usize) -> Self {
        let (byte, mask) = bitpos(idx);
        let byte = &mut bytes[byte];
        let value = *byte & mask != 0;
        Self { byte, mask, value }
    }

    /// Returns the current value of the proxied bit.
    #[must_use]
    #[inline]
    pub fn get(&self) -> bool {
        self.value
    }

    /// Writes `value` into the proxied bit, consuming the handle.
    #[inline]
    pub fn set(mut self, value: bool) {
        self.commit(value);
        mem::forget(self);
    }

    /// Replaces the value, returning the previous one.
    #[inline]
    pub fn replace(&mut self, value: bool) -> bool {
        mem::replace(&mut self.value, value)
    }

    fn commit(&mut self, value: bool) {
        if value {
            *self.byte |= self.mask;
        } else {
            *self.byte &= !self.mask;
        }
    }
}

impl Deref for BitRef<'_> {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl DerefMut for BitRef<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.value
    }
}

impl Drop for BitRef<'_> {
    fn drop(&mut self) {
        let value = self.value;
        self.commit(value);
    }
}

impl PartialEq for BitRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for BitRef<'_> {}

impl PartialEq<bool> for BitRef<'_> {
    fn eq(&self, other: &bool) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for BitRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitRef")
            .field("mask", &format_args!("{:#010b}", self.mask))
            .field("value", &self.value)
            .finish()
    }
}
