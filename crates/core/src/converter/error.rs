//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during conversion.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// External tool binary not found.
    #[error("{tool} not found at path: {path}")]
    ToolNotFound { tool: String, path: PathBuf },

    /// Input file not found.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// The converter cannot produce this target format.
    #[error("Unsupported target format for {converter}: {format}")]
    UnsupportedTarget { converter: String, format: String },

    /// The converter cannot convert between these two formats.
    #[error("Unsupported conversion: {source_format} → {target_format}")]
    UnsupportedRoute {
        source_format: String,
        target_format: String,
    },

    /// Output file already exists and overwriting is disabled.
    #[error("Output file already exists: {path}")]
    OutputExists { path: PathBuf },

    /// Output directory does not exist and could not be created.
    #[error("Failed to create output directory: {path}")]
    OutputDirectoryFailed { path: PathBuf },

    /// Conversion process failed.
    #[error("Conversion failed: {reason}")]
    ConversionFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// Input could not be decoded.
    #[error("Failed to decode input: {reason}")]
    Decode { reason: String },

    /// I/O error during conversion.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Creates a new conversion failed error with stderr output.
    pub fn conversion_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Creates a new decode error.
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported target error for the named converter.
    pub fn unsupported_target(converter: &str, format: impl Into<String>) -> Self {
        Self::UnsupportedTarget {
            converter: converter.to_string(),
            format: format.into(),
        }
    }

    /// Message shown to the user, including tool stderr when available.
    pub fn detailed_message(&self) -> String {
        match self {
            Self::ConversionFailed {
                stderr: Some(stderr),
                ..
            } if !stderr.trim().is_empty() => format!("{}: {}", self, stderr.trim()),
            _ => self.to_string(),
        }
    }
}
