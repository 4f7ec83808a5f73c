//! Error types for low-tide scraping.
//!
//! This module defines the main error type [`LowtideError`] which covers
//! malformed input, unexpected page structure, fetching and configuration.
//!
//! # Example
//!
//! ```rust
//! use lowtide_core::{LowtideError, normalize};
//!
//! match normalize("Main Beach Anytown") {
//!     Ok(location) => println!("{}", location.primary),
//!     Err(LowtideError::InputFormat { input }) => println!("bad line: {input}"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for low-tide scraping operations.
#[derive(Error, Debug)]
pub enum LowtideError {
    /// A location line is not of the form `"<beach>, <city>"`.
    ///
    /// Returned by [`crate::normalize`] when the `", "` separator is missing.
    /// No split is guessed.
    #[error("Malformed location {input:?}: expected \"<beach>, <city>\"")]
    InputFormat { input: String },

    /// A Low Tide row has fewer cells than the column layout requires.
    ///
    /// `row` is the zero-based index of the row within the tide table.
    #[error("Low Tide row {row} has {cells} cells, at least {required} required")]
    DocumentStructure { row: usize, cells: usize, required: usize },

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided or built from the configured base.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid CSS selector used to locate the tide table.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read or write errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file errors.
    ///
    /// Returned when a config file exists but cannot be parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization of the result set failed.
    #[error("Failed to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for LowtideError.
pub type Result<T> = std::result::Result<T, LowtideError>;
