//! Error types for upset-viz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering an upset plot.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, terminal output).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or figure.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// No categories were provided.
    #[error("Empty data provided")]
    EmptyData,

    /// A highlight referenced a category that is not part of the plot.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Scale domain error (e.g., equal axis limits).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Style configuration could not be parsed.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// Style configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),
}
