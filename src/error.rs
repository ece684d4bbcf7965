//! # Centralized Error Handling
//!
//! Unified error types for the entire crate using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gtbench operations
#[derive(Error, Debug)]
pub enum GtBenchError {
    /// I/O errors (file missing, permission denied, read/write failures)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in the variant corpus (wrong field count, bad position)
    #[error("malformed variant record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// The same rsid appeared in more than one chromosome group
    #[error("non-unique rsid: {0}")]
    DuplicateRsid(String),

    /// A VCF container or its index could not be opened
    #[error("cannot open store for chromosome {chromosome} at {path}: {message}")]
    StoreOpen {
        chromosome: String,
        path: PathBuf,
        message: String,
    },

    /// Unexpected failure from the indexed-query primitive during a lookup
    #[error("lookup failed: {message}")]
    Lookup { message: String },

    /// Configuration errors (invalid CLI arguments)
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Type alias for Results using GtBenchError
pub type Result<T> = std::result::Result<T, GtBenchError>;

impl GtBenchError {
    /// Create a malformed-record error for a corpus line
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// Create a store-open error
    pub fn store_open(
        chromosome: impl Into<String>,
        path: impl Into<PathBuf>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::StoreOpen {
            chromosome: chromosome.into(),
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a lookup error
    pub fn lookup(message: impl std::fmt::Display) -> Self {
        Self::Lookup {
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
