//! Binary reader for bounds-checked parsing of Mii records.
//!
//! This module provides [`BinaryReader`], a cursor over a byte slice. Mii
//! layouts mix endianness between console generations (Wii records are
//! big-endian, 3DS/Wii U records little-endian), so every multi-byte read
//! exists in both flavours.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::text;
use crate::{Error, Result};

/// A binary reader that borrows a byte slice and tracks a read position.
///
/// # Example
///
/// ```
/// use mii_common::BinaryReader;
///
/// let data = [0x12, 0x34, 0x78, 0x56];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u16_be().unwrap(), 0x1234);
/// assert_eq!(reader.read_u16().unwrap(), 0x5678);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Create a new reader starting at a specific position.
    #[inline]
    pub const fn new_at(data: &'a [u8], position: usize) -> Self {
        Self { data, position }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    ///
    /// Seeking exactly to the end is allowed; anything further is rejected
    /// so that a bad layout offset surfaces here rather than as a short read.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(Error::OffsetOutOfRange {
                offset: position,
                len: self.data.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read a fixed-size array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_bytes(2).map(LittleEndian::read_u16)
    }

    /// Read a big-endian u16.
    #[inline]
    pub fn read_u16_be(&mut self) -> Result<u16> {
        self.read_bytes(2).map(BigEndian::read_u16)
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bytes(4).map(LittleEndian::read_u32)
    }

    /// Read a big-endian u32.
    #[inline]
    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.read_bytes(4).map(BigEndian::read_u32)
    }

    /// Read a fixed UTF-16 slot of `units` code units and decode it up to the
    /// first NUL unit.
    ///
    /// The whole slot is consumed regardless of where the name ends, which is
    /// how the name fields are laid out on disk.
    pub fn read_utf16_slot(&mut self, units: usize, big_endian: bool) -> Result<String> {
        let bytes = self.read_bytes(units * 2)?;
        Ok(text::decode_utf16_slot(bytes, 0, big_endian, units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_both_endians() {
        let data = [
            0x01u8, 0x02, 0x03, 0x04, // u32 LE: 0x04030201
            0x01, 0x02, 0x03, 0x04, // u32 BE: 0x01020304
        ];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32().unwrap(), 0x04030201);
        assert_eq!(reader.read_u32_be().unwrap(), 0x01020304);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_peek_does_not_advance() {
        let data = [0xAB, 0xCD];
        let reader = BinaryReader::new(&data);

        assert_eq!(reader.peek_bytes(2).unwrap(), &[0xAB, 0xCD]);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_short_read_reports_shortfall() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(
            reader.read_u32(),
            Err(Error::UnexpectedEof {
                needed: 4,
                available: 2
            })
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_seek_bounds() {
        let data = [0u8; 4];
        let mut reader = BinaryReader::new(&data);

        assert!(reader.seek(4).is_ok());
        assert!(reader.is_empty());
        assert!(matches!(
            reader.seek(5),
            Err(Error::OffsetOutOfRange { offset: 5, len: 4 })
        ));
    }

    #[test]
    fn test_utf16_slot_consumes_whole_slot() {
        // "Hi" big-endian, NUL, then junk in the rest of a 4-unit slot.
        let data = [0x00, b'H', 0x00, b'i', 0x00, 0x00, 0x41, 0x41, 0xFF];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_utf16_slot(4, true).unwrap(), "Hi");
        assert_eq!(reader.position(), 8);
        assert_eq!(reader.read_u8().unwrap(), 0xFF);
    }

    #[test]
    fn test_eof_error() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(
            reader.read_u32(),
            Err(Error::UnexpectedEof {
                needed: 4,
                available: 2
            })
        ));
    }
}
