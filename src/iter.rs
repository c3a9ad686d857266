//! Iterator implementations for the bit containers.

use core::iter::{FromIterator, FusedIterator};

use crate::{
    DynamicBitVector, FixedBitSet, GrowthPolicy,
    storage::{self, bitpos},
};

/// An iterator over every bit of a container, as `bool`, index 0 first.
///
/// Created by `iter` on either container or by iterating a reference to one.
///
/// # Examples
///
/// ```
/// use smol_bitset::bitvector;
///
/// let bits = bitvector![1, 0, 0, 1];
/// let forward: Vec<bool> = bits.iter().collect();
/// assert_eq!(forward, [true, false, false, true]);
///
/// let backward: Vec<bool> = bits.iter().rev().take(2).collect();
/// assert_eq!(backward, [true, false]);
/// ```
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    bytes: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(bytes: &'a [u8], len: usize) -> Self {
        Self {
            bytes,
            pos: 0,
            end: len,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        let bit = storage::get(self.bytes, self.pos);
        self.pos += 1;
        Some(bit)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.pos = self.pos.saturating_add(n).min(self.end);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.pos;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        self.end -= 1;
        Some(storage::get(self.bytes, self.end))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// An iterator over the indices of the set bits of a container, ascending.
///
/// Whole zero bytes are skipped at once.
///
/// # Examples
///
/// ```
/// use smol_bitset::FixedBitSet;
///
/// let bits: FixedBitSet!(20) = FixedBitSet::from_value(0b1000_0000_0000_0010_0001);
/// assert_eq!(bits.ones().collect::<Vec<_>>(), [0, 5, 19]);
/// assert_eq!(bits.ones().next_back(), Some(19));
/// ```
#[derive(Clone, Debug)]
pub struct Ones<'a> {
    bytes: &'a [u8],
    pos: usize,  // next candidate (forward)
    rpos: usize, // one past the last candidate (reverse)
}

impl<'a> Ones<'a> {
    pub(crate) fn new(bytes: &'a [u8], len: usize) -> Self {
        Self {
            bytes,
            pos: 0,
            rpos: len,
        }
    }
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.rpos {
            let (bi, _) = bitpos(self.pos);
            let byte = self.bytes[bi] & (0xff >> (self.pos & 7));
            if byte == 0 {
                self.pos = (bi + 1) * 8;
                continue;
            }

            let idx = bi * 8 + byte.leading_zeros() as usize;
            if idx >= self.rpos {
                break;
            }
            self.pos = idx + 1;
            return Some(idx);
        }

        self.pos = self.rpos;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.rpos.saturating_sub(self.pos)))
    }
}

impl DoubleEndedIterator for Ones<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while self.pos < self.rpos {
            let last = self.rpos - 1;
            let (bi, _) = bitpos(last);
            let byte = self.bytes[bi] & (0xff << (7 - (last & 7)));
            if byte == 0 {
                self.rpos = bi * 8;
                continue;
            }

            let idx = bi * 8 + 7 - byte.trailing_zeros() as usize;
            if idx < self.pos {
                break;
            }
            self.rpos = idx;
            return Some(idx);
        }

        self.rpos = self.pos;
        None
    }
}

impl FusedIterator for Ones<'_> {}

impl<'a, const N: usize, const B: usize> IntoIterator for &'a FixedBitSet<N, B> {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, P: GrowthPolicy> IntoIterator for &'a DynamicBitVector<P> {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: GrowthPolicy> Extend<bool> for DynamicBitVector<P> {
    /// Appends every bit of the iterator.
    ///
    /// # Panics
    ///
    /// Panics if the vector would exceed the maximum bit length.
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            if let Err(err) = self.push(bit) {
                panic!("{err}");
            }
        }
    }
}

impl<'a, P: GrowthPolicy> Extend<&'a bool> for DynamicBitVector<P> {
    fn extend<I: IntoIterator<Item = &'a bool>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<P: GrowthPolicy> FromIterator<bool> for DynamicBitVector<P> {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = Self::default();
        bits.extend(iter);
        bits
    }
}
