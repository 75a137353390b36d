//! Wii profile header.
//!
//! Both Wii layouts start with the same 74-byte character data:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0x00   | 2    | Packed flags, big-endian (see below) |
//! | 0x02   | 20   | Mii name, 10 UTF-16BE units |
//! | 0x16   | 2    | Height and build |
//! | 0x18   | 4    | Mii ID (creation timestamp in the low 28 bits) |
//! | 0x1C   | 26   | System ID and face parts |
//! | 0x36   | 20   | Creator name, 10 UTF-16BE units |
//!
//! The packed flags word holds, from the top bit down: one unused bit, the
//! gender bit, a 4-bit birth month, a 5-bit birth day, a 4-bit favourite
//! colour and the "favourite Mii" bit.

use std::fmt;

use mii_common::text::NAME_CODE_UNITS;
use mii_common::BinaryReader;

use crate::color::FavoriteColor;
use crate::layout::{resolve, LayoutKind};
use crate::{Error, Result};

/// Offset of the Mii name slot.
pub const NAME_OFFSET: usize = 0x02;

/// Offset of the 4-byte Mii ID.
pub const MII_ID_OFFSET: usize = 0x18;

/// Offset of the creator name slot.
pub const CREATOR_NAME_OFFSET: usize = 0x36;

/// Gender recorded in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Profile fields of a Wii Mii.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RflProfile {
    pub gender: Gender,
    /// Birth month, 1-12, or 0 when unset.
    pub birth_month: u8,
    /// Birth day, 1-31, or 0 when unset.
    pub birth_day: u8,
    /// Raw favourite colour index (4 bits, may be off-palette).
    pub favorite_color_index: u8,
    pub is_favorite: bool,
    /// Mii name as stored; may be empty.
    pub name: String,
    /// Creator name as stored; may be empty.
    pub creator_name: String,
    pub mii_id: [u8; 4],
}

impl RflProfile {
    /// Parse the profile header of a 74- or 76-byte Wii record.
    pub fn parse(buffer: &[u8]) -> Result<Self> {
        let length = buffer.len();
        match resolve(length).map(|layout| layout.kind) {
            Some(LayoutKind::RflCharData | LayoutKind::RflStoreData) => {}
            _ => return Err(Error::NotRflRecord { length }),
        }

        let mut reader = BinaryReader::new(buffer);
        let flags = reader.read_u16_be()?;
        let name = reader.read_utf16_slot(NAME_CODE_UNITS, true)?;

        reader.seek(MII_ID_OFFSET)?;
        let mii_id = reader.read_array::<4>()?;

        reader.seek(CREATOR_NAME_OFFSET)?;
        let creator_name = reader.read_utf16_slot(NAME_CODE_UNITS, true)?;

        Ok(Self {
            gender: if flags & (1 << 14) != 0 {
                Gender::Female
            } else {
                Gender::Male
            },
            birth_month: ((flags >> 10) & 0xF) as u8,
            birth_day: ((flags >> 5) & 0x1F) as u8,
            favorite_color_index: ((flags >> 1) & 0xF) as u8,
            is_favorite: flags & 1 != 0,
            name,
            creator_name,
            mii_id,
        })
    }

    /// Mii name, or `Unnamed` when empty.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unnamed"
        } else {
            &self.name
        }
    }

    /// Creator name, or `Unknown` when empty.
    pub fn display_creator(&self) -> &str {
        if self.creator_name.is_empty() {
            "Unknown"
        } else {
            &self.creator_name
        }
    }

    /// Birthday as `(month, day)`, if both are set.
    pub fn birthday(&self) -> Option<(u8, u8)> {
        (self.birth_month != 0 && self.birth_day != 0)
            .then_some((self.birth_month, self.birth_day))
    }

    /// Birthday as `m/d`, or `Not set`.
    pub fn birthday_label(&self) -> String {
        match self.birthday() {
            Some((month, day)) => format!("{month}/{day}"),
            None => "Not set".to_string(),
        }
    }

    /// Favourite colour, if the index is on the palette.
    pub fn favorite_color(&self) -> Option<FavoriteColor> {
        FavoriteColor::from_index(self.favorite_color_index)
    }

    /// Favourite colour name, or `Unknown (n)` for off-palette indices.
    pub fn favorite_color_label(&self) -> String {
        match self.favorite_color() {
            Some(color) => color.name().to_string(),
            None => format!("Unknown ({})", self.favorite_color_index),
        }
    }

    /// Mii ID as upper-case hex.
    pub fn mii_id_hex(&self) -> String {
        self.mii_id.iter().map(|b| format!("{b:02X}")).collect()
    }
}
