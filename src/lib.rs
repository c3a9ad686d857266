//! Compact bit containers with byte-level storage.
//!
//! This crate provides two containers sharing one storage layout:
//!
//! - [`FixedBitSet`]: exactly `N` bits held inline in `ceil(N / 8)` bytes,
//!   never allocating. Name the type with the [`FixedBitSet!`] macro.
//! - [`DynamicBitVector`]: a growable bit sequence on the heap with amortized
//!   O(1) [`push`](DynamicBitVector::push) and explicit capacity control.
//!
//! Single bits are read with `test`/`get`/indexing and written with
//! `set`/`reset`/`flip`, or through a [`BitRef`] proxy from `get_mut`.
//!
//! # Features
//!
//! - **Checked operations**: out-of-range indices, mismatched operands, and
//!   oversized requests return an [`Error`] instead of panicking
//! - **Whole-container operations**: population count, `all`/`any`/`none`,
//!   bitwise operators, and shifts that preserve the length
//! - **Configurable growth** through [`GrowthPolicy`]
//! - **Serialization support** via serde and rkyv (optional)
//! - **Allocation tracing** via `tracing` (optional)
//! - **`no_std` support** with `alloc`
//!
//! # Examples
//!
//! ```
//! use smol_bitset::{DynamicBitVector, FixedBitSet, bitvector};
//!
//! // Fixed size, no allocation
//! let mut flags: FixedBitSet!(10) = FixedBitSet::new();
//! flags.set(2, true)?;
//! flags.flip(9)?;
//! assert_eq!(flags.to_string(), "0010000001");
//! assert_eq!(flags.count(), 2);
//! assert!(flags.set(10, true).is_err());
//!
//! // Growable
//! let mut bits = DynamicBitVector::new();
//! bits.push(true)?;
//! bits.push(false)?;
//! bits.resize(5, true)?;
//! assert_eq!(bits, bitvector![1, 0, 1, 1, 1]);
//!
//! // Both share the layout, so they compare directly
//! let fixed: FixedBitSet!(5) = "10111".parse()?;
//! assert_eq!(fixed, bits);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Storage Layout
//!
//! Bit `i` lives in byte `i / 8`, and within a byte the most significant bit
//! holds the lowest index. The `Display` output lists bits from index 0, so
//! the string and the byte dump read in the same order:
//!
//! ```
//! use smol_bitset::FixedBitSet;
//!
//! let bits: FixedBitSet!(12) = "110000000001".parse()?;
//! assert_eq!(bits.as_bytes(), &[0b1100_0000, 0b0001_0000]);
//! # Ok::<(), smol_bitset::ParseBitsError>(())
//! ```
//!
//! Converting to and from integers does not depend on this layout or on the
//! host byte order: bit `i` of the integer is always bit index `i`.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

// Module declarations
mod error;
mod fixed;
mod iter;
mod macros;
mod policy;
mod reference;
mod storage;
mod traits;
mod vector;

#[cfg(feature = "rkyv")]
mod rkyv;

#[cfg(feature = "serde")]
pub mod serde;

// Re-exports
pub use error::{Error, ErrorKind, ParseBitsError};
pub use fixed::FixedBitSet;
pub use iter::{Iter, Ones};
pub use policy::{DefaultGrowth, GrowthPolicy};
pub use reference::BitRef;
pub use storage::bytes_for;
pub use vector::DynamicBitVector;

#[cfg(feature = "rkyv")]
pub use fixed::ArchivedFixedBitSet;
#[cfg(feature = "rkyv")]
pub use vector::ArchivedDynamicBitVector;
