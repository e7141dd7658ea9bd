//! Core types for grid decoding.

use thiserror::Error;

use crate::grid::GridError;

/// Error types for decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes do not start with a PNG signature.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded pixels could not be turned into a grid.
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}
