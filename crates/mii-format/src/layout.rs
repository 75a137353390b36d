//! The catalog of known Mii record layouts.
//!
//! Mii records carry no magic bytes or version field. The only thing that
//! tells the layouts apart is the byte length of the record, so resolution is
//! an exact-length lookup over an ordered table. When two entries accept the
//! same length the earlier one wins; [`Catalog::ambiguous_sizes`] exists so
//! that a new entry cannot introduce such an overlap without a test noticing.

use log::trace;

/// Identity of a record layout.
///
/// Layout-specific field extraction matches on this exhaustively, so adding a
/// layout forces every extractor to decide what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LayoutKind {
    /// 3DS / Wii U core data without the creator block.
    FflCoreData,
    /// 3DS / Wii U official data as written by Mii Maker.
    FflOfficial,
    /// 3DS / Wii U store data with CRC-16 trailer.
    FflStoreData,
    /// Larger containers that wrap store data.
    FflStoreDataConvertible,
    /// Wii character data.
    RflCharData,
    /// Wii store data with CRC-16 trailer.
    RflStoreData,
    /// Switch character info.
    NxCharInfo,
    /// Switch core data and store data.
    NxCoreData,
    /// Mii Studio data, plain or obfuscated.
    StudioData,
}

/// A catalog entry describing where the fields of one layout live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDescriptor {
    /// Layout identity.
    pub kind: LayoutKind,
    /// Human-readable label. Not unique across the catalog.
    pub name: &'static str,
    /// Record lengths this entry matches.
    pub accepted_sizes: &'static [usize],
    /// Start of the display-name slot, if the layout has one.
    pub name_offset: Option<usize>,
    /// Whether the name's UTF-16 code units are stored big-endian.
    pub name_big_endian: bool,
    /// Offset of the big-endian CRC-16 trailer, if the layout has one.
    pub checksum_offset: Option<usize>,
    /// Marks the convertible store-data group. Carried as metadata only.
    pub special_case: bool,
}

impl LayoutDescriptor {
    /// Check whether this layout accepts a record of `length` bytes.
    #[inline]
    pub fn accepts(&self, length: usize) -> bool {
        self.accepted_sizes.contains(&length)
    }

    /// Check whether records in this layout carry an integrity trailer.
    #[inline]
    pub const fn has_checksum(&self) -> bool {
        self.checksum_offset.is_some()
    }
}

/// The built-in layouts, in resolution order.
pub const LAYOUTS: &[LayoutDescriptor] = &[
    LayoutDescriptor {
        kind: LayoutKind::FflCoreData,
        name: "FFLiMiiDataCore",
        accepted_sizes: &[72],
        name_offset: Some(0x1A),
        name_big_endian: false,
        checksum_offset: None,
        special_case: false,
    },
    LayoutDescriptor {
        kind: LayoutKind::FflOfficial,
        name: "FFLiMiiDataOfficial",
        accepted_sizes: &[92],
        name_offset: Some(0x1A),
        name_big_endian: false,
        checksum_offset: None,
        special_case: false,
    },
    LayoutDescriptor {
        kind: LayoutKind::FflStoreData,
        name: "FFLStoreData",
        accepted_sizes: &[96],
        name_offset: Some(0x1A),
        name_big_endian: false,
        checksum_offset: Some(0x5E),
        special_case: false,
    },
    LayoutDescriptor {
        kind: LayoutKind::FflStoreDataConvertible,
        name: "FFLStoreData",
        accepted_sizes: &[104, 106, 108, 336],
        name_offset: Some(0x1A),
        name_big_endian: false,
        checksum_offset: None,
        special_case: true,
    },
    LayoutDescriptor {
        kind: LayoutKind::RflCharData,
        name: "RFLCharData",
        accepted_sizes: &[74],
        name_offset: Some(0x02),
        name_big_endian: true,
        checksum_offset: None,
        special_case: false,
    },
    LayoutDescriptor {
        kind: LayoutKind::RflStoreData,
        name: "RFLStoreData",
        accepted_sizes: &[76],
        name_offset: Some(0x02),
        name_big_endian: true,
        checksum_offset: Some(0x4A),
        special_case: false,
    },
    LayoutDescriptor {
        kind: LayoutKind::NxCharInfo,
        name: "nn::mii::CharInfo",
        accepted_sizes: &[88],
        name_offset: Some(0x10),
        name_big_endian: false,
        checksum_offset: None,
        special_case: false,
    },
    LayoutDescriptor {
        kind: LayoutKind::NxCoreData,
        name: "nn::mii::CoreData",
        accepted_sizes: &[48, 68],
        name_offset: Some(0x1A),
        name_big_endian: false,
        checksum_offset: None,
        special_case: false,
    },
    LayoutDescriptor {
        kind: LayoutKind::StudioData,
        name: "Mii Studio Data",
        accepted_sizes: &[46, 47],
        name_offset: None,
        name_big_endian: false,
        checksum_offset: None,
        special_case: false,
    },
];

/// An ordered set of layouts to resolve record lengths against.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    layouts: &'a [LayoutDescriptor],
}

impl Catalog<'static> {
    /// The catalog of every layout this crate knows about.
    pub const fn builtin() -> Self {
        Self { layouts: LAYOUTS }
    }
}

impl Default for Catalog<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> Catalog<'a> {
    /// Create a catalog over a custom layout table.
    pub const fn new(layouts: &'a [LayoutDescriptor]) -> Self {
        Self { layouts }
    }

    /// All layouts in resolution order.
    pub const fn layouts(&self) -> &'a [LayoutDescriptor] {
        self.layouts
    }

    /// Find the layout for a record of `length` bytes.
    ///
    /// The first entry accepting the length wins. There is no fuzzy matching:
    /// an unknown length is never mapped to a "closest" layout.
    pub fn resolve(&self, length: usize) -> Option<&'a LayoutDescriptor> {
        let found = self.layouts.iter().find(|layout| layout.accepts(length));
        match found {
            Some(layout) => trace!("resolved {length}-byte record as {}", layout.name),
            None => trace!("no layout accepts a {length}-byte record"),
        }
        found
    }

    /// Every accepted length, in catalog order, possibly with duplicates.
    pub fn accepted_sizes(&self) -> impl Iterator<Item = usize> + 'a {
        self.layouts
            .iter()
            .flat_map(|layout| layout.accepted_sizes.iter().copied())
    }

    /// Lengths claimed by more than one layout, sorted and deduplicated.
    pub fn ambiguous_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.accepted_sizes().collect();
        sizes.sort_unstable();

        let mut ambiguous: Vec<usize> = sizes
            .windows(2)
            .filter(|pair| pair[0] == pair[1])
            .map(|pair| pair[0])
            .collect();
        ambiguous.dedup();
        ambiguous
    }
}

/// Resolve a record length against the built-in catalog.
#[inline]
pub fn resolve(length: usize) -> Option<&'static LayoutDescriptor> {
    Catalog::builtin().resolve(length)
}
