/// Names the [`FixedBitSet`](crate::FixedBitSet) type holding `N` bits.
///
/// `FixedBitSet` carries its byte count as a second const parameter because
/// stable Rust cannot compute `ceil(N / 8)` inside a type. This macro fills it
/// in. `N` must be a concrete constant.
///
/// # Examples
///
/// ```
/// use smol_bitset::FixedBitSet;
///
/// let bits: FixedBitSet!(12) = FixedBitSet::from(0xfffu16);
/// assert_eq!(bits.len(), 12);
/// assert_eq!(bits.as_bytes().len(), 2);
/// assert!(bits.all());
/// ```
#[macro_export]
macro_rules! FixedBitSet {
    ($bits:expr) => {
        $crate::FixedBitSet<{ $bits }, { $crate::bytes_for($bits) }>
    };
}

/// Creates a [`DynamicBitVector`](crate::DynamicBitVector) from bit literals.
///
/// Accepts a list of `0`/`1` (or `bool`) values, index 0 first, or a
/// `value; len` pair.
///
/// # Panics
///
/// The `value; len` form panics if `len` exceeds the maximum bit length.
///
/// # Examples
///
/// ```
/// use smol_bitset::bitvector;
///
/// let bits = bitvector![1, 0, 1, 1];
/// assert_eq!(bits.to_string(), "1011");
///
/// let ones = bitvector![true; 10];
/// assert_eq!(ones.count(), 10);
/// assert_eq!(bitvector![1; 10], ones);
///
/// let empty = bitvector![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! bitvector {
    () => {
        $crate::DynamicBitVector::new()
    };
    ($value:expr; $len:expr) => {
        match $crate::DynamicBitVector::<$crate::DefaultGrowth>::filled($len, ($value as u8) != 0) {
            ::core::result::Result::Ok(bits) => bits,
            ::core::result::Result::Err(err) => ::core::panic!("{}", err),
        }
    };
    ($($bit:expr),+ $(,)?) => {
        <$crate::DynamicBitVector as ::core::iter::FromIterator<bool>>::from_iter([
            $(($bit as u8) != 0),+
        ])
    };
}

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => { ::tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! debug {
    ($($arg:tt)*) => { ::tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

pub(crate) use debug;
pub(crate) use trace;
