//! Mii extraction from console database dumps.
//!
//! The Wii, Wii U and 3DS keep their Miis in flat database files (as dumped
//! by Dolphin, Cemu or Citra): a short header followed by fixed-size slots.
//! This crate walks those slots and produces one `.mii` record per occupied
//! slot.
//!
//! | Kind | Source | Offset | Slot | Limit | Prefix |
//! |------|--------|--------|------|-------|--------|
//! | Wii Plaza | `RFL_DB.dat` | 0x4 | 74 | 100 | `WII_PL` |
//! | Wii Parade | `RFL_DB.dat` | 0x1F1DE | 64 (+10 padding) | 10000 | `WII_PA` |
//! | Wii U Mii Maker | `FFL_ODB.dat` | 0x8 | 92 | 3000 | `WIIU_MA` |
//! | 3DS Mii Maker | `CFL_DB.dat` | 0x8 | 92 | 100 | `3DS_MA` |
//!
//! # Example
//!
//! ```no_run
//! use mii_db::{extract_from_path, DatabaseKind};
//!
//! let miis = extract_from_path(DatabaseKind::WiiPlaza, "RFL_DB.dat")?;
//! for mii in &miis {
//!     mii.write_to("extracted")?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod extract;
mod kind;

pub use error::{Error, Result};
pub use extract::{extract, extract_from_path, ExtractedMii, Slots};
pub use kind::DatabaseKind;
