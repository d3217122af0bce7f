//! Masked little-endian codec.
//!
//! Every field in the save is stored as `width` little-endian bytes, each
//! XORed with its own mask byte. A field's width is always the length of its
//! mask, so the functions here take the mask slice and derive the width from it.

use crate::error::{Error, Result};

/// Widest field the save format uses
pub const MAX_WIDTH: usize = 4;

/// Reject widths outside 1..=4
pub fn validate_width(width: usize) -> Result<()> {
    if (1..=MAX_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(Error::InvalidWidth(width))
    }
}

/// Largest value representable in `width` bytes (`256^width - 1`)
pub fn max_value(width: usize) -> u32 {
    match width {
        0 => 0,
        w if w >= MAX_WIDTH => u32::MAX,
        w => (1u32 << (8 * w)) - 1,
    }
}

/// Byte `n` of `value`, byte 0 being least significant
pub fn byte_at(value: u32, n: usize) -> u8 {
    value.to_le_bytes()[n]
}

/// Place value of byte position `n` (`256^n`)
pub fn place_value(n: usize) -> u32 {
    1u32 << (8 * n)
}

fn check_range(len: usize, address: usize, width: usize) -> Result<()> {
    match address.checked_add(width) {
        Some(end) if end <= len => Ok(()),
        _ => Err(Error::AddressOutOfRange {
            address,
            width,
            len,
        }),
    }
}

/// Decode the masked field at `address` whose width is `mask.len()`.
pub fn decode(raw: &[u8], address: usize, mask: &[u8]) -> Result<u32> {
    let width = mask.len();
    validate_width(width)?;
    check_range(raw.len(), address, width)?;

    let value = raw[address..address + width]
        .iter()
        .zip(mask)
        .enumerate()
        .fold(0u32, |acc, (i, (&b, &k))| acc | (u32::from(b ^ k) << (8 * i)));
    Ok(value)
}

/// Encode `value` into `mask.len()` masked bytes.
///
/// Values wider than the field are rejected rather than truncated.
pub fn encode(value: u32, mask: &[u8]) -> Result<Vec<u8>> {
    let width = mask.len();
    validate_width(width)?;
    if value > max_value(width) {
        return Err(Error::ValueOutOfRange {
            value: u64::from(value),
            width,
        });
    }

    Ok(value
        .to_le_bytes()
        .iter()
        .zip(mask)
        .map(|(&b, &k)| b ^ k)
        .collect())
}

/// Encode `value` and write it to `raw` at `address`.
///
/// The blob is left untouched on error.
pub fn write(raw: &mut [u8], address: usize, mask: &[u8], value: u32) -> Result<()> {
    let bytes = encode(value, mask)?;
    check_range(raw.len(), address, bytes.len())?;
    raw[address..address + bytes.len()].copy_from_slice(&bytes);
    Ok(())
}
