//! Error types for Mii record decoding.

use thiserror::Error;

/// Why a buffer could not be decoded as a Mii record.
///
/// Both variants are fatal for the buffer in question; no partial record is
/// produced. Callers processing many records should report the failure and
/// move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    /// The buffer length matches no layout in the catalog.
    #[error("unsupported record size: {length} bytes")]
    UnsupportedSize { length: usize },

    /// The layout carries a checksum trailer and it does not match.
    #[error(
        "checksum mismatch at {offset:#x}: stored {}, computed {}",
        fmt_crc(.stored),
        fmt_crc(.computed)
    )]
    ChecksumInvalid {
        offset: usize,
        stored: Option<u16>,
        computed: Option<u16>,
    },
}

impl DecodeFailure {
    /// Short name of the failure kind, for reports and CSV output.
    pub const fn kind(&self) -> &'static str {
        match self {
            DecodeFailure::UnsupportedSize { .. } => "UnsupportedSize",
            DecodeFailure::ChecksumInvalid { .. } => "ChecksumInvalid",
        }
    }
}

fn fmt_crc(value: &Option<u16>) -> String {
    match value {
        Some(v) => format!("{v:#06x}"),
        None => "<missing>".to_string(),
    }
}

/// Errors from the record readers that sit beside the decoder.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] mii_common::Error),

    /// The record is not one of the Wii layouts.
    #[error("not a Wii record: {length} bytes")]
    NotRflRecord { length: usize },

    /// No creation timestamp is known for this record size.
    #[error("record format is unknown (size: {length})")]
    UnknownTimestampFormat { length: usize },

    /// The creation timestamp does not fit in a civil datetime.
    #[error("timestamp out of range: {0}")]
    TimestampRange(#[from] jiff::Error),
}

/// Result type for Mii reader operations.
pub type Result<T> = std::result::Result<T, Error>;
