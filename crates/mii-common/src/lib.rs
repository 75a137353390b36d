//! Common utilities for the Mii tooling crates.
//!
//! This crate provides the byte-level building blocks shared by every layout:
//!
//! - [`BinaryReader`] - Bounds-checked reading from byte slices in either endianness
//! - [`checksum`] - The CRC-16 trailer used by store-data layouts
//! - [`text`] - Fixed-slot, NUL-terminated UTF-16 name fields

mod error;
mod reader;

pub mod checksum;
pub mod text;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export byteorder so downstream crates name the same endianness types.
pub use byteorder::{BigEndian, ByteOrder, LittleEndian};
