//! Domain error types
//!
//! This module defines the error hierarchy for labelfuse. Only
//! [`LabelFuseError::MissingFile`] and [`LabelFuseError::MalformedExport`] describe
//! problems with the input data; everything irregular below the top level of an
//! export is defaulted locally and never surfaces here.

use std::path::PathBuf;
use thiserror::Error;

/// Main labelfuse error type
///
/// This is the primary error type used throughout the library. All variants
/// carry owned strings or paths so third-party error types never leak out.
#[derive(Debug, Error)]
pub enum LabelFuseError {
    /// An input file does not exist
    #[error("Input file not found: {}", path.display())]
    MissingFile {
        /// Path that was expected to exist
        path: PathBuf,
    },

    /// The top-level shape of an export is not what the loader expects
    #[error("Malformed export {}: field '{field}': {reason}", path.display())]
    MalformedExport {
        /// Export file the problem was found in
        path: PathBuf,
        /// Offending field, e.g. `annotations` or `annotations[3]`
        field: String,
        /// Human-readable description
        reason: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Reproducibility verification errors
    #[error("Verification error: {0}")]
    Verification(String),
}

impl LabelFuseError {
    /// Creates a `MissingFile` error for the given path
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    /// Creates a `MalformedExport` error
    pub fn malformed(
        path: impl Into<PathBuf>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedExport {
            path: path.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by the input exports themselves
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::MissingFile { .. } | Self::MalformedExport { .. })
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for LabelFuseError {
    fn from(err: std::io::Error) -> Self {
        LabelFuseError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LabelFuseError {
    fn from(err: serde_json::Error) -> Self {
        LabelFuseError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LabelFuseError {
    fn from(err: toml::de::Error) -> Self {
        LabelFuseError::Configuration(format!("TOML parse error: {err}"))
    }
}
