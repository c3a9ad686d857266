//! Error types.

use thiserror::Error;

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An index or positional access was outside the container.
    OutOfRange,
    /// The operands of a binary operation were incompatible.
    InvalidArgument,
    /// A size or capacity request exceeded the hard maximum.
    LengthError,
    /// The bits do not fit in the requested integer type.
    Overflow,
}

/// Errors returned by the checked container operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A bit index was not below the container length.
    #[error("bit index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// The container length at the time of the call
        len: usize,
    },

    /// A positional or whole-container operation was applied to an empty
    /// vector.
    #[error("`{op}` called on an empty bit vector")]
    Empty {
        /// Name of the rejected operation
        op: &'static str,
    },

    /// The operands of a bitwise operation have different lengths.
    #[error("bitwise operands differ in length: {lhs} != {rhs}")]
    LengthMismatch {
        /// Length of the left operand
        lhs: usize,
        /// Length of the right operand
        rhs: usize,
    },

    /// A bitwise operation was given an empty operand.
    #[error("bitwise operand is empty")]
    EmptyOperand,

    /// A bit length larger than the maximum was requested.
    #[error("requested length of {requested} bits exceeds maximum of {max}")]
    LengthExceeded {
        /// Requested number of bits
        requested: usize,
        /// Maximum number of bits
        max: usize,
    },

    /// A byte capacity larger than the maximum was requested.
    #[error("requested capacity of {requested} bytes exceeds maximum of {max}")]
    CapacityExceeded {
        /// Requested number of bytes
        requested: usize,
        /// Maximum number of bytes
        max: usize,
    },

    /// A set bit lies beyond the width of the target integer.
    #[error("value needs {bits} bits but target type holds {max}")]
    Overflow {
        /// Index one past the highest set bit
        bits: usize,
        /// Width of the target type
        max: usize,
    },
}

impl Error {
    /// Returns the category this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitset::{DynamicBitVector, ErrorKind};
    ///
    /// let mut bits = DynamicBitVector::new();
    /// let err = bits.pop().unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::OutOfRange);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IndexOutOfRange { .. } | Self::Empty { .. } => ErrorKind::OutOfRange,
            Self::LengthMismatch { .. } | Self::EmptyOperand => ErrorKind::InvalidArgument,
            Self::LengthExceeded { .. } | Self::CapacityExceeded { .. } => ErrorKind::LengthError,
            Self::Overflow { .. } => ErrorKind::Overflow,
        }
    }
}

/// Errors that can occur when parsing a bit string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBitsError {
    /// A character other than `'0'` or `'1'` was found.
    #[error("invalid character '{ch}' at position {pos} in bit string")]
    InvalidChar {
        /// The invalid character
        ch: char,
        /// Its position in the string
        pos: usize,
    },

    /// A fixed-size set was parsed from a string of the wrong length.
    #[error("expected {expected} bits, found {actual}")]
    WrongLength {
        /// Number of bits in the target set
        expected: usize,
        /// Number of characters in the input
        actual: usize,
    },

    /// The string holds more bits than a vector can address.
    #[error("bit string longer than the maximum of {max} bits")]
    TooLong {
        /// Maximum number of bits
        max: usize,
    },
}
