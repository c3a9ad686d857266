//! Rkyv support for `FixedBitSet` and `DynamicBitVector`.
//!
//! Both containers derive `Archive`. Validation rejects archives that break
//! the layout invariants, and the archived forms can be read in place
//! without deserializing.

use rkyv::{
    bytecheck::Verify,
    rancor::{Fallible, Source, fail},
};
use thiserror::Error as ThisError;

use crate::{
    Error, GrowthPolicy,
    fixed::ArchivedFixedBitSet,
    iter::{Iter, Ones},
    storage::{self, tail_mask},
    vector::ArchivedDynamicBitVector,
};

/// Validation failure for an archived fixed set with bits set past `N`.
#[derive(Debug, ThisError)]
#[error("archived fixed bit set of {len} bits has bits set past its length")]
struct DirtyTail {
    len: usize,
}

// ============================================================================
// FixedBitSet
// ============================================================================

// SAFETY: `verify` only inspects bytes that `CheckBytes` already validated.
unsafe impl<C, const N: usize, const B: usize> Verify<C> for ArchivedFixedBitSet<N, B>
where
    C: Fallible + ?Sized,
    C::Error: Source,
{
    fn verify(&self, _context: &mut C) -> Result<(), C::Error> {
        if let Some(&last) = self.bytes.last()
            && last & !tail_mask(N) != 0
        {
            fail!(DirtyTail { len: N });
        }
        Ok(())
    }
}

impl<const N: usize, const B: usize> ArchivedFixedBitSet<N, B> {
    /// Returns the number of bits, `N`.
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns `true` if the set holds zero bits.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Returns the bit at `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        (index < N).then(|| storage::get(&self.bytes, index))
    }

    /// Returns the number of set bits.
    #[must_use]
    pub fn count(&self) -> usize {
        storage::count_ones(&self.bytes, N)
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

// ============================================================================
// DynamicBitVector
// ============================================================================

// SAFETY: `verify` only inspects fields that `CheckBytes` already validated.
unsafe impl<C, P> Verify<C> for ArchivedDynamicBitVector<P>
where
    C: Fallible + ?Sized,
    C::Error: Source,
    P: GrowthPolicy,
{
    fn verify(&self, _context: &mut C) -> Result<(), C::Error> {
        let len = self.len.to_native() as usize;
        if len > P::MAX_BITS {
            fail!(Error::LengthExceeded {
                requested: len,
                max: P::MAX_BITS,
            });
        }
        let capacity = self.bytes.len();
        if capacity > P::MAX_BYTES {
            fail!(Error::CapacityExceeded {
                requested: capacity,
                max: P::MAX_BYTES,
            });
        }
        let max = capacity.saturating_mul(8);
        if len > max {
            fail!(Error::LengthExceeded {
                requested: len,
                max,
            });
        }
        Ok(())
    }
}

impl<P> ArchivedDynamicBitVector<P> {
    /// Returns the number of bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len.to_native() as usize
    }

    /// Returns `true` if the vector holds no bits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the bit at `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.len()).then(|| storage::get(&self.bytes, index))
    }

    /// Returns the number of set bits.
    #[must_use]
    pub fn count(&self) -> usize {
        storage::count_ones(&self.bytes, self.len())
    }

    /// Returns an iterator over every bit, index 0 first.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.bytes, self.len())
    }

    /// Returns an iterator over the indices of the set bits.
    #[must_use]
    pub fn ones(&self) -> Ones<'_> {
        Ones::new(&self.bytes, self.len())
    }
}

// ============================================================================
// Tests
// ============================================================================
