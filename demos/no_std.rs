//! Example demonstrating `no_std` usage with `smol_bitset`
// #![no_std]

extern crate alloc;
use alloc::vec::Vec;
use smol_bitset::{DynamicBitVector, Error, FixedBitSet};

fn run() -> Result<(), Error> {
    // Fixed-size sets need no allocator at all
    let mut mask: FixedBitSet!(24) = FixedBitSet::from(0x00_ff_00u32);
    mask.flip(0)?;
    core::hint::black_box(mask.count());

    // Growable vectors use alloc for their byte storage
    let mut bits = DynamicBitVector::new();
    for i in 0..100 {
        bits.push(i % 4 == 0)?;
    }
    core::hint::black_box(bits.capacity());

    // Collect set positions into an alloc::vec::Vec
    let ones: Vec<usize> = bits.ones().take(5).collect();
    core::hint::black_box(ones);

    // Conversions work the same as in std environments
    let widened = DynamicBitVector::from(mask);
    let value = u32::try_from(&widened)?;
    core::hint::black_box(value);

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        core::hint::black_box(err);
    }
}
