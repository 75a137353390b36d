//! Mii record decoding.
//!
//! Mii data comes in a handful of fixed-size binary layouts, one or two per
//! console generation, with no header to tell them apart. This crate resolves
//! a record's layout from its length, verifies the CRC-16 trailer where the
//! layout has one, and extracts the display name and clothing colour.
//!
//! # Layouts
//!
//! | Layout | Bytes | Name | Checksum |
//! |--------|-------|------|----------|
//! | `FFLiMiiDataCore` | 72 | 0x1A, UTF-16LE | - |
//! | `FFLiMiiDataOfficial` | 92 | 0x1A, UTF-16LE | - |
//! | `FFLStoreData` | 96 | 0x1A, UTF-16LE | 0x5E |
//! | `FFLStoreData` | 104, 106, 108, 336 | 0x1A, UTF-16LE | - |
//! | `RFLCharData` | 74 | 0x02, UTF-16BE | - |
//! | `RFLStoreData` | 76 | 0x02, UTF-16BE | 0x4A |
//! | `nn::mii::CharInfo` | 88 | 0x10, UTF-16LE | - |
//! | `nn::mii::CoreData` | 48, 68 | 0x1A, UTF-16LE | - |
//! | `Mii Studio Data` | 46, 47 | - | - |
//!
//! Records in layouts without a checksum decode as
//! [`Integrity::Unchecked`]: their length was right, nothing more is known.
//!
//! # Example
//!
//! ```no_run
//! use mii_format::decode;
//!
//! let bytes = std::fs::read("WII_PL00000.mii")?;
//! match decode(&bytes) {
//!     Ok(record) => println!("{} ({}): {}", record.display_name, record.layout_name, record.clothing_color),
//!     Err(failure) => eprintln!("skipping: {failure}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;

pub mod color;
pub mod decoder;
pub mod layout;
pub mod rfl;
pub mod timestamp;

pub use color::{extract_clothing_color, ClothingColor, FavoriteColor, PALETTE};
pub use decoder::{decode, DecodedRecord, Integrity, RecordDecoder};
pub use error::{DecodeFailure, Error, Result};
pub use layout::{resolve, Catalog, LayoutDescriptor, LayoutKind, LAYOUTS};
pub use rfl::{Gender, RflProfile};
pub use timestamp::{creation_time, CreationTime, TimestampEra};
