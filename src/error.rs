//! Error types for the bodycomp application.

use thiserror::Error;

/// Errors raised while validating user input before any metric is computed.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("name must not be empty")]
    MissingName,

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown gender: {0} (expected male or female)")]
    UnknownGender(String),
}

/// Errors that can occur while writing the summary workbook.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("worksheet not found: {0}")]
    MissingSheet(String),

    #[error("cannot write workbook {path}: {reason}")]
    Write { path: String, reason: String },
}
