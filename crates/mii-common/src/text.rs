//! Fixed-slot UTF-16 name fields.
//!
//! Every Mii layout stores names as a fixed number of UTF-16 code units. The
//! logical name ends at the first `0x0000` unit; whatever follows inside the
//! slot is padding. Wii records store the units big-endian, later consoles
//! little-endian.

/// Default slot width of a Mii name, in UTF-16 code units.
pub const NAME_CODE_UNITS: usize = 10;

/// Decode a NUL-terminated UTF-16 slot starting at `offset`.
///
/// At most `max_code_units` units are read. The window is clipped to the end
/// of `buffer`, so this never fails: no terminator yields the full-width name,
/// and unpaired surrogates become U+FFFD.
pub fn decode_utf16_slot(
    buffer: &[u8],
    offset: usize,
    big_endian: bool,
    max_code_units: usize,
) -> String {
    let window = buffer.get(offset..).unwrap_or_default();

    let units = window
        .chunks_exact(2)
        .take(max_code_units)
        .map(|pair| {
            if big_endian {
                u16::from_be_bytes([pair[0], pair[1]])
            } else {
                u16::from_le_bytes([pair[0], pair[1]])
            }
        })
        .take_while(|&unit| unit != 0);

    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
