//! Byte-level bit arithmetic shared by the fixed and dynamic containers.
//!
//! Bit index `i` lives in byte `i / 8`. Within a byte the most significant
//! bit holds the lowest sub-index, so bit `i % 8 == 0` is `0x80`. Every routine
//! here works on a byte slice plus a logical bit length; bytes past
//! `bytes_for(len)` and bits past `len` in the final byte are never read as
//! data.

use core::fmt;

/// Mask of sub-index 0 within a byte.
pub(crate) const MSB: u8 = 0x80;

/// Number of bytes needed to hold `bits` bits.
///
/// # Examples
///
/// ```
/// assert_eq!(smol_bitset::bytes_for(0), 0);
/// assert_eq!(smol_bitset::bytes_for(1), 1);
/// assert_eq!(smol_bitset::bytes_for(16), 2);
/// assert_eq!(smol_bitset::bytes_for(17), 3);
/// ```
#[must_use]
#[inline(always)]
pub const fn bytes_for(bits: usize) -> usize {
    bits.div_ceil(8)
}

/// Convert bit index to (byte index, mask within byte)
#[inline(always)]
pub(crate) const fn bitpos(idx: usize) -> (usize, u8) {
    (idx >> 3, MSB >> (idx & 7))
}

/// Mask selecting the valid bits of the final byte of a `bits`-long buffer.
///
/// A multiple of 8 yields a full byte.
#[inline(always)]
pub(crate) const fn tail_mask(bits: usize) -> u8 {
    match bits & 7 {
        0 => 0xff,
        r => !(0xff >> r),
    }
}

/// Branchless population count of a single byte.
#[inline(always)]
pub(crate) const fn popcount8(b: u8) -> u32 {
    let b = b - ((b >> 1) & 0x55);
    let b = (b & 0x33) + ((b >> 2) & 0x33);
    ((b + (b >> 4)) & 0x0f) as u32
}

#[inline(always)]
pub(crate) fn get(bytes: &[u8], idx: usize) -> bool {
    let (byte, mask) = bitpos(idx);
    bytes[byte] & mask != 0
}

#[inline(always)]
pub(crate) fn put(bytes: &mut [u8], idx: usize, value: bool) {
    let (byte, mask) = bitpos(idx);
    if value {
        bytes[byte] |= mask;
    } else {
        bytes[byte] &= !mask;
    }
}

#[inline(always)]
pub(crate) fn toggle(bytes: &mut [u8], idx: usize) {
    let (byte, mask) = bitpos(idx);
    bytes[byte] ^= mask;
}

/// Clears the bits past `len` in the final used byte.
#[inline]
pub(crate) fn clear_tail(bytes: &mut [u8], len: usize) {
    if len & 7 != 0 {
        bytes[len >> 3] &= tail_mask(len);
    }
}

/// Counts the set bits among the first `len` bits.
pub(crate) fn count_ones(bytes: &[u8], len: usize) -> usize {
    let full = len >> 3;
    let mut count: usize = bytes[..full].iter().map(|&b| popcount8(b) as usize).sum();
    if len & 7 != 0 {
        count += popcount8(bytes[full] & tail_mask(len)) as usize;
    }
    count
}

/// Returns `true` if any of the first `len` bits is set.
pub(crate) fn any(bytes: &[u8], len: usize) -> bool {
    let full = len >> 3;
    if bytes[..full].iter().any(|&b| b != 0) {
        return true;
    }
    len & 7 != 0 && bytes[full] & tail_mask(len) != 0
}

/// Writes `value` into every bit of `[beg, end)`.
pub(crate) fn fill_range(bytes: &mut [u8], beg: usize, end: usize, value: bool) {
    if beg >= end {
        return;
    }
    let (first, _) = bitpos(beg);
    let (last, _) = bitpos(end - 1);
    // Bits of the first/last byte that fall inside the range.
    let head = 0xff >> (beg & 7);
    let tail = tail_mask(end);
    let apply = |byte: &mut u8, mask: u8| {
        if value {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    };

    if first == last {
        apply(&mut bytes[first], head & tail);
        return;
    }
    apply(&mut bytes[first], head);
    bytes[first + 1..last].fill(if value { 0xff } else { 0 });
    apply(&mut bytes[last], tail);
}

/// Moves every bit from index `i` to `i + n`, zero-filling the vacated low
/// indices and discarding bits pushed past `len`.
pub(crate) fn shift_up(bytes: &mut [u8], len: usize, n: usize) {
    let used = bytes_for(len);
    let bytes = &mut bytes[..used];
    if n >= len {
        bytes.fill(0);
        return;
    }
    let (byte_shift, bit_shift) = (n >> 3, (n & 7) as u32);
    for dst in (0..used).rev() {
        bytes[dst] = match dst.checked_sub(byte_shift) {
            None => 0,
            Some(src) if bit_shift == 0 => bytes[src],
            Some(src) => {
                let carry = if src > 0 {
                    bytes[src - 1] << (8 - bit_shift)
                } else {
                    0
                };
                (bytes[src] >> bit_shift) | carry
            }
        };
    }
    clear_tail(bytes, len);
}

/// Moves every bit from index `i` to `i - n`, zero-filling the vacated high
/// indices and discarding bits pushed below zero.
pub(crate) fn shift_down(bytes: &mut [u8], len: usize, n: usize) {
    let used = bytes_for(len);
    let bytes = &mut bytes[..used];
    if n >= len {
        bytes.fill(0);
        return;
    }
    // Stale bits past `len` would otherwise slide into the valid range.
    clear_tail(bytes, len);
    let (byte_shift, bit_shift) = (n >> 3, (n & 7) as u32);
    for dst in 0..used {
        let src = dst + byte_shift;
        let at = |i: usize| bytes.get(i).copied().unwrap_or(0);
        let value = if bit_shift == 0 {
            at(src)
        } else {
            (at(src) << bit_shift) | (at(src + 1) >> (8 - bit_shift))
        };
        bytes[dst] = value;
    }
}

/// Loads the low bits of `value` so that value bit `i` becomes bit index `i`.
///
/// The byte order of the host does not influence the result.
pub(crate) fn load_value(bytes: &mut [u8], len: usize, value: u128) {
    let used = bytes_for(len);
    for (j, byte) in bytes[..used].iter_mut().enumerate().take(16) {
        *byte = ((value >> (j * 8)) as u8).reverse_bits();
    }
    clear_tail(bytes, len);
}

/// Reads the first `min(len, 128)` bits back into an integer, the inverse of
/// [`load_value`].
pub(crate) fn store_value(bytes: &[u8], len: usize) -> u128 {
    let used = bytes_for(len.min(128));
    let mut value = 0u128;
    for (j, &byte) in bytes[..used].iter().enumerate() {
        let byte = if (j + 1) * 8 > len {
            byte & tail_mask(len)
        } else {
            byte
        };
        value |= u128::from(byte.reverse_bits()) << (j * 8);
    }
    value
}

/// Index one past the highest set bit among the first `len` bits.
pub(crate) fn bit_width(bytes: &[u8], len: usize) -> usize {
    let used = bytes_for(len);
    for j in (0..used).rev() {
        let byte = if j + 1 == used {
            bytes[j] & tail_mask(len)
        } else {
            bytes[j]
        };
        if byte != 0 {
            return j * 8 + 8 - byte.trailing_zeros() as usize;
        }
    }
    0
}

/// Bitwise equality over the first `len` bits of two buffers.
pub(crate) fn eq_bits(a: &[u8], b: &[u8], len: usize) -> bool {
    let full = len >> 3;
    if a[..full] != b[..full] {
        return false;
    }
    len & 7 == 0 || (a[full] ^ b[full]) & tail_mask(len) == 0
}

/// Writes the `'0'`/`'1'` rendering of the first `len` bits.
pub(crate) fn write_bits(f: &mut fmt::Formatter<'_>, bytes: &[u8], len: usize) -> fmt::Result {
    use fmt::Write;

    for i in 0..len {
        f.write_char(if get(bytes, i) { '1' } else { '0' })?;
    }
    Ok(())
}

/// Iterates the characters of a bit string, rejecting anything but `0`/`1`.
pub(crate) fn parse_bits(
    s: &str,
) -> impl Iterator<Item = Result<bool, crate::ParseBitsError>> + '_ {
    s.chars().enumerate().map(|(pos, ch)| match ch {
        '0' => Ok(false),
        '1' => Ok(true),
        _ => Err(crate::ParseBitsError::InvalidChar { ch, pos }),
    })
}
