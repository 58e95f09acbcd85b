//! Error handling for configuration and other process-level concerns.
//!
//! # Examples
//!
//! ```
//! use swaggen::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("concurrency must be at least 1"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for configuration operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("Failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
