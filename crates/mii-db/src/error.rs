//! Error types for database extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when extracting Miis from a database dump.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The database file does not exist.
    #[error("{} not found", .0.display())]
    DatabaseNotFound(PathBuf),

    /// The database file could not be opened.
    #[error("permission denied accessing {}", .0.display())]
    PermissionDenied(PathBuf),

    /// Unrecognised database kind name.
    #[error("unknown database kind '{0}' (valid: wii-plaza, wii-parade, wiiu-maker, 3ds-maker)")]
    UnknownKind(String),
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;
