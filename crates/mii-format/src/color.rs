//! Favourite colour palette and the bit-packed clothing colour field.
//!
//! A Mii's clothing colour is its favourite colour: a 4-bit index into a fixed
//! 12-entry palette. Where the index lives differs per layout, and only some
//! layouts have their colour bits mapped so far.

use std::fmt;

use crate::layout::{LayoutDescriptor, LayoutKind};

/// Number of entries in the favourite colour palette.
pub const PALETTE_SIZE: usize = 12;

/// RGB hex value of each palette entry, by index.
pub const PALETTE: [&str; PALETTE_SIZE] = [
    "#FF0000", "#FF8C00", "#FFD700", "#7CFC00", "#006400", "#0000FF", "#87CEEB", "#FF69B4",
    "#800080", "#8B4513", "#FFFFFF", "#000000",
];

/// One of the twelve favourite colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FavoriteColor {
    Red = 0,
    Orange = 1,
    Yellow = 2,
    Green = 3,
    DarkGreen = 4,
    Blue = 5,
    LightBlue = 6,
    Pink = 7,
    Purple = 8,
    Brown = 9,
    White = 10,
    Black = 11,
}

impl FavoriteColor {
    /// All colours in palette order.
    pub const ALL: [FavoriteColor; PALETTE_SIZE] = [
        FavoriteColor::Red,
        FavoriteColor::Orange,
        FavoriteColor::Yellow,
        FavoriteColor::Green,
        FavoriteColor::DarkGreen,
        FavoriteColor::Blue,
        FavoriteColor::LightBlue,
        FavoriteColor::Pink,
        FavoriteColor::Purple,
        FavoriteColor::Brown,
        FavoriteColor::White,
        FavoriteColor::Black,
    ];

    /// Look up a palette index. Indices past the palette yield `None`.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Palette index of this colour.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// RGB hex string, e.g. `#FF0000`.
    pub const fn hex(self) -> &'static str {
        PALETTE[self as usize]
    }

    /// Colour name as shown in the console editors.
    pub const fn name(self) -> &'static str {
        match self {
            FavoriteColor::Red => "Red",
            FavoriteColor::Orange => "Orange",
            FavoriteColor::Yellow => "Yellow",
            FavoriteColor::Green => "Green",
            FavoriteColor::DarkGreen => "DarkGreen",
            FavoriteColor::Blue => "Blue",
            FavoriteColor::LightBlue => "LightBlue",
            FavoriteColor::Pink => "Pink",
            FavoriteColor::Purple => "Purple",
            FavoriteColor::Brown => "Brown",
            FavoriteColor::White => "White",
            FavoriteColor::Black => "Black",
        }
    }
}

impl fmt::Display for FavoriteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded clothing colour of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClothingColor {
    /// A palette colour.
    Known(FavoriteColor),
    /// The layout's colour bits are not mapped, or the index is off-palette.
    Unknown,
}

impl ClothingColor {
    /// Map a raw palette index, treating off-palette values as unknown.
    pub fn from_index(index: u8) -> Self {
        FavoriteColor::from_index(index).map_or(Self::Unknown, Self::Known)
    }

    /// RGB hex string, if known.
    pub fn hex(&self) -> Option<&'static str> {
        match self {
            ClothingColor::Known(color) => Some(color.hex()),
            ClothingColor::Unknown => None,
        }
    }

    /// Check whether a colour was decoded.
    pub fn is_known(&self) -> bool {
        matches!(self, ClothingColor::Known(_))
    }
}

impl fmt::Display for ClothingColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex().unwrap_or("Unknown"))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ClothingColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Read the clothing colour of a record in the given layout.
///
/// Only the 96-byte 3DS/Wii U store data and the Wii layouts have their colour
/// bits mapped; everything else is [`ClothingColor::Unknown`]. Short or
/// malformed buffers also come back as unknown rather than failing.
pub fn extract_clothing_color(buffer: &[u8], layout: &LayoutDescriptor) -> ClothingColor {
    let index = match layout.kind {
        // Little-endian u16 at 0x18, bits 10..=13.
        LayoutKind::FflStoreData => packed_u16(buffer, 0x18, false).map(|bits| (bits >> 10) & 0xF),
        // Big-endian u16 at 0x00.
        LayoutKind::RflCharData | LayoutKind::RflStoreData => {
            packed_u16(buffer, 0x00, true).map(|bits| (bits >> 8) & 0xF)
        }
        LayoutKind::FflCoreData
        | LayoutKind::FflOfficial
        | LayoutKind::FflStoreDataConvertible
        | LayoutKind::NxCharInfo
        | LayoutKind::NxCoreData
        | LayoutKind::StudioData => None,
    };

    // The mask keeps the index within four bits.
    index.map_or(ClothingColor::Unknown, |i| ClothingColor::from_index(i as u8))
}

fn packed_u16(buffer: &[u8], offset: usize, big_endian: bool) -> Option<u16> {
    let pair = buffer.get(offset..offset.checked_add(2)?)?;
    let bytes = [pair[0], pair[1]];
    Some(if big_endian {
        u16::from_be_bytes(bytes)
    } else {
        u16::from_le_bytes(bytes)
    })
}
