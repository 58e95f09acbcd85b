//! Error types for the generation domain

use thiserror::Error;

/// Errors that can occur while loading a document or synthesizing its interface
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Swagger loading error: {0}")]
    LoadError(String),

    #[error("Unresolved parameter reference '{reference}' in {method} {path}")]
    UnresolvedParameter {
        reference: String,
        method: String,
        path: String,
    },

    #[error("Print error: {0}")]
    PrintError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
