//! Import error types.
//!
//! An unparseable value is always a hard failure here; nothing is defaulted
//! to zero or skipped silently. The caller decides how far a failure
//! reaches: the CSV driver aborts the current file, the batch runner logs
//! and moves on to the next one.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the import pipeline.
#[derive(Debug, Error)]
pub enum ImportError {
    /// A required configuration field is missing or invalid.
    #[error("invalid configuration: {message}")]
    Configuration {
        /// What was wrong with the configuration.
        message: String,
    },

    /// A configured column is absent from a data row.
    #[error("missing column '{field}' in row")]
    MissingColumn {
        /// The configured field name that could not be found.
        field: String,
    },

    /// A date value matched none of the accepted formats.
    #[error("unable to parse date: {value}")]
    DateFormat {
        /// The offending date string.
        value: String,
    },

    /// An amount value is not a recognized decimal representation.
    #[error("unable to parse amount: {value}")]
    AmountFormat {
        /// The offending amount string.
        value: String,
    },

    /// A row could not be decoded as delimited text.
    #[error("malformed row: {0}")]
    Csv(#[from] csv::Error),

    /// IO error reading a source or configuration file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ImportError {
    /// Shorthand for a configuration error with a formatted message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
