//! Mii - decoding and extraction of Mii records across console generations.
//!
//! This crate provides a unified interface to the Mii library crates.
//!
//! # Crates
//!
//! - [`mii_common`] - Common utilities (binary reading, UTF-16 slots, CRC-16)
//! - [`mii_format`] - Layout catalog and record decoding
//! - [`mii_db`] - Slot extraction from console database dumps
//!
//! # Example
//!
//! ```no_run
//! use mii::prelude::*;
//!
//! for mii in extract_from_path(DatabaseKind::WiiPlaza, "RFL_DB.dat")? {
//!     let record = decode(&mii.data)?;
//!     println!("{}: {} ({})", mii.file_name, record.display_name, record.clothing_color);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use mii_common as common;
pub use mii_db as db;
pub use mii_format as format;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use mii_common::{checksum, text, BinaryReader};
    pub use mii_db::{extract, extract_from_path, DatabaseKind, ExtractedMii};
    pub use mii_format::{
        creation_time, decode, resolve, Catalog, ClothingColor, CreationTime, DecodeFailure,
        DecodedRecord, FavoriteColor, Gender, Integrity, LayoutDescriptor, LayoutKind,
        RecordDecoder, RflProfile,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
