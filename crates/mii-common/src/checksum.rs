//! CRC-16 checksum used by Mii store-data layouts.
//!
//! Store-data records end in a big-endian 16-bit trailer computed over every
//! byte before it. The algorithm is CRC-16/CCITT with a zero seed (the XMODEM
//! parameter set), evaluated one byte at a time on a split high/low
//! accumulator without a lookup table. The values must match what the console
//! encoders produce, bit for bit.

use byteorder::{BigEndian, ByteOrder};

/// Size of the checksum trailer in bytes.
pub const TRAILER_SIZE: usize = 2;

/// Compute the checksum of a byte slice.
pub fn crc16(data: &[u8]) -> u16 {
    let mut msb: u8 = 0;
    let mut lsb: u8 = 0;

    for &byte in data {
        let mut x = byte ^ msb;
        x ^= x >> 4;
        msb = lsb ^ (x >> 3) ^ (x << 4);
        lsb = x ^ (x << 5);
    }

    u16::from(msb) << 8 | u16::from(lsb)
}

/// Compute the checksum covering everything before `checksum_offset`.
///
/// Returns `None` if the buffer is too short to hold the trailer.
pub fn compute(buffer: &[u8], checksum_offset: usize) -> Option<u16> {
    if buffer.len() < checksum_offset.checked_add(TRAILER_SIZE)? {
        return None;
    }
    Some(crc16(&buffer[..checksum_offset]))
}

/// Read the big-endian trailer stored at `checksum_offset`.
pub fn stored(buffer: &[u8], checksum_offset: usize) -> Option<u16> {
    let end = checksum_offset.checked_add(TRAILER_SIZE)?;
    buffer.get(checksum_offset..end).map(BigEndian::read_u16)
}

/// Verify the trailer at `checksum_offset` against the bytes preceding it.
///
/// A buffer too short to contain the trailer never verifies.
pub fn verify(buffer: &[u8], checksum_offset: usize) -> bool {
    match (compute(buffer, checksum_offset), stored(buffer, checksum_offset)) {
        (Some(actual), Some(expected)) => actual == expected,
        _ => false,
    }
}
