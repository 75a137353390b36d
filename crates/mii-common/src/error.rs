//! Error types for mii-common.

use thiserror::Error;

/// Common error type for Mii byte-level operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// A seek or read targeted an offset past the end of the buffer.
    #[error("offset {offset:#x} is outside a {len}-byte buffer")]
    OffsetOutOfRange { offset: usize, len: usize },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
