//! Growth configuration for [`DynamicBitVector`](crate::DynamicBitVector).

/// Capacity limits and growth schedule of a dynamic bit vector.
///
/// Growth doubles the byte capacity while it is below [`MID_BYTES`], then
/// grows by half of the current capacity, never exceeding [`MAX_BYTES`]. This
/// keeps `push` amortized O(1) while bounding the slack carried by very large
/// vectors.
///
/// [`MID_BYTES`]: Self::MID_BYTES
/// [`MAX_BYTES`]: Self::MAX_BYTES
///
/// # Examples
///
/// ```
/// use smol_bitset::{DynamicBitVector, GrowthPolicy};
///
/// /// At most four bytes of storage.
/// struct Tiny;
///
/// impl GrowthPolicy for Tiny {
///     const MIN_BYTES: usize = 1;
///     const MID_BYTES: usize = 2;
///     const MAX_BYTES: usize = 4;
/// }
///
/// let mut bits = DynamicBitVector::<Tiny>::default();
/// for _ in 0..32 {
///     bits.push(true).unwrap();
/// }
/// assert!(bits.push(true).is_err());
/// ```
pub trait GrowthPolicy {
    /// Capacity of the first allocation.
    const MIN_BYTES: usize;
    /// Capacity below which growth doubles.
    const MID_BYTES: usize;
    /// Hard upper bound on the byte capacity.
    const MAX_BYTES: usize;
    /// Hard upper bound on the bit length.
    const MAX_BITS: usize = Self::MAX_BYTES.saturating_mul(8);

    /// Capacity to grow to from a full buffer of `current` bytes.
    #[must_use]
    fn next_capacity(current: usize) -> usize {
        let next = if current == 0 {
            Self::MIN_BYTES.max(1)
        } else if current < Self::MID_BYTES {
            current.saturating_mul(2)
        } else {
            current.saturating_add((current / 2).max(1))
        };
        next.min(Self::MAX_BYTES)
    }
}

/// The default policy: 8-byte first allocation, doubling up to 1 MiB, and a
/// maximum that keeps the bit length addressable by `usize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DefaultGrowth;

impl GrowthPolicy for DefaultGrowth {
    const MIN_BYTES: usize = 8;
    const MID_BYTES: usize = 1 << 20;
    const MAX_BYTES: usize = usize::MAX >> 3;
}
