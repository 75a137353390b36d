//! Record decoding: layout resolution, integrity check, field extraction.

use log::debug;
use mii_common::{checksum, text};

use crate::color::{extract_clothing_color, ClothingColor};
use crate::layout::{Catalog, LayoutDescriptor, LayoutKind};
use crate::DecodeFailure;

/// Integrity status of a decoded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Integrity {
    /// The layout's checksum trailer matched.
    Verified,
    /// The layout has no checksum, so nothing beyond the length was checked.
    Unchecked,
}

/// The fields decoded from one Mii record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodedRecord {
    /// Catalog label of the resolved layout.
    pub layout_name: &'static str,
    /// Resolved layout identity.
    pub layout: LayoutKind,
    /// Record length in bytes.
    pub byte_length: usize,
    /// Display name, or the layout label for layouts without a name slot.
    pub display_name: String,
    /// Clothing (favourite) colour.
    pub clothing_color: ClothingColor,
    /// Whether a checksum vouched for the record.
    pub integrity: Integrity,
}

/// Decodes records against a layout catalog.
///
/// The decoder holds no mutable state; one instance can be shared across
/// threads and decoding the same bytes always gives the same result.
#[derive(Debug, Clone, Copy)]
pub struct RecordDecoder<'a> {
    catalog: Catalog<'a>,
}

impl RecordDecoder<'static> {
    /// A decoder over the built-in catalog.
    pub const fn builtin() -> Self {
        Self {
            catalog: Catalog::builtin(),
        }
    }
}

impl Default for RecordDecoder<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> RecordDecoder<'a> {
    /// Create a decoder over a specific catalog.
    pub const fn new(catalog: Catalog<'a>) -> Self {
        Self { catalog }
    }

    /// The catalog records are resolved against.
    pub const fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Decode a record.
    pub fn decode(&self, buffer: &[u8]) -> Result<DecodedRecord, DecodeFailure> {
        let length = buffer.len();
        let layout = self
            .catalog
            .resolve(length)
            .ok_or(DecodeFailure::UnsupportedSize { length })?;

        let integrity = check_integrity(buffer, layout)?;

        let display_name = match layout.name_offset {
            Some(offset) => text::decode_utf16_slot(
                buffer,
                offset,
                layout.name_big_endian,
                text::NAME_CODE_UNITS,
            ),
            None => layout.name.to_string(),
        };

        let clothing_color = extract_clothing_color(buffer, layout);

        Ok(DecodedRecord {
            layout_name: layout.name,
            layout: layout.kind,
            byte_length: length,
            display_name,
            clothing_color,
            integrity,
        })
    }
}

/// Decode a record against the built-in catalog.
pub fn decode(buffer: &[u8]) -> Result<DecodedRecord, DecodeFailure> {
    RecordDecoder::builtin().decode(buffer)
}

fn check_integrity(buffer: &[u8], layout: &LayoutDescriptor) -> Result<Integrity, DecodeFailure> {
    let Some(offset) = layout.checksum_offset else {
        return Ok(Integrity::Unchecked);
    };

    if checksum::verify(buffer, offset) {
        debug!("{} checksum verified at {offset:#x}", layout.name);
        return Ok(Integrity::Verified);
    }

    let failure = DecodeFailure::ChecksumInvalid {
        offset,
        stored: checksum::stored(buffer, offset),
        computed: checksum::compute(buffer, offset),
    };
    debug!("{}: {failure}", layout.name);
    Err(failure)
}
