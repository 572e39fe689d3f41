//! Error types for trueno-chart operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-chart operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Style attribute name outside the enumerated attribute set.
    #[error("unknown style attribute: '{name}'")]
    UnknownAttribute {
        /// The offending attribute name.
        name: String,
    },

    /// Style value whose kind does not match what the attribute expects.
    #[error("invalid value for style attribute '{attr}': expected {expected}")]
    InvalidStyleValue {
        /// The attribute being set.
        attr: String,
        /// The value kind the attribute expects.
        expected: &'static str,
    },

    /// Theme name not present in the theme registry.
    #[error("unknown theme: '{name}'")]
    UnknownTheme {
        /// The offending theme name.
        name: String,
    },

    /// Chart call with missing or malformed data for the requested kind.
    #[error("invalid chart call: {reason}")]
    InvalidChartCall {
        /// What was wrong with the call, including the series index
        /// where applicable.
        reason: String,
    },

    /// Explicit grid too small for the number of items it must hold.
    #[error("invalid grid: {rows}x{cols} cannot hold {count} items")]
    InvalidGrid {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
        /// Number of items that must fit.
        count: usize,
    },

    /// Overlay requested across figures that cannot share an axis.
    #[error("incompatible overlay: {reason}")]
    IncompatibleOverlay {
        /// Why the figures cannot be overlaid.
        reason: String,
    },

    /// Figure carries no chart metadata; composite figures are terminal.
    #[error("figure is missing chart metadata (composite figures cannot be composed further)")]
    MissingMetadata,

    /// Color parsing error.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Figure export requested in a format the backend does not provide.
    #[error("unsupported figure format: '{extension}'")]
    UnsupportedFormat {
        /// The requested file extension.
        extension: String,
    },
}
