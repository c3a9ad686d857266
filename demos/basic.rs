//! Basic usage examples for `FixedBitSet` and `DynamicBitVector`

use smol_bitset::{DynamicBitVector, Error, FixedBitSet, bitvector};

fn main() -> Result<(), Error> {
    println!("=== FixedBitSet ===\n");

    // Eight bytes of storage, one per eight bits
    let mut flags: FixedBitSet!(60) = FixedBitSet::new();
    flags.set(0, true)?;
    flags.set(5, true)?;
    flags.flip(59)?;
    println!("Flags:        {flags}");
    println!("Set bits:     {:?}", flags.ones().collect::<Vec<_>>());
    println!("Count:        {}", flags.count());

    // Out-of-range access is an error, not a panic
    match flags.set(60, true) {
        Err(err) => println!("Out of range: {err}"),
        Ok(()) => unreachable!(),
    }

    // Integers map bit `i` of the value to index `i`
    let byte: FixedBitSet!(8) = FixedBitSet::from(0b0000_0110u8);
    println!("From 0b110:   {byte}");
    println!("Back again:   {:#010b}", u8::try_from(&byte)?);

    println!("\n=== DynamicBitVector ===\n");

    let mut history = DynamicBitVector::new();
    println!("Initial capacity: {} bits", history.capacity());
    for i in 0..20 {
        history.push(i % 3 == 0)?;
    }
    println!("After 20 pushes: {history}");
    println!("Capacity:        {} bits", history.capacity());

    let last = history.pop()?;
    println!("Popped {last}, length now {}", history.len());

    // Shifting moves bits toward index 0 and fills the end with zeros
    history >>= 4;
    println!("Shifted by 4:    {history}");

    // Growing with a fill value
    history.resize(24, true)?;
    println!("Resized to 24:   {history}");

    println!("\n=== Bitwise operations ===\n");

    let a = bitvector![1, 1, 0, 0, 1];
    let b = bitvector![1, 0, 1, 0, 1];
    println!("a       = {a}");
    println!("b       = {b}");
    println!("a & b   = {}", &a & &b);
    println!("a | b   = {}", &a | &b);
    println!("a ^ b   = {}", &a ^ &b);
    println!("!a      = {}", !&a);

    // Length mismatches are reported through the checked forms
    let mut c = a.clone();
    if let Err(err) = c.union_with(&bitvector![1, 0]) {
        println!("Mismatch: {err}");
    }

    // A single-bit handle
    let mut d = bitvector![0; 4];
    if let Some(mut bit) = d.get_mut(2) {
        *bit = !*bit;
    }
    println!("After flip via handle: {d}");

    Ok(())
}
