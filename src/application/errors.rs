//! Application layer error types

use thiserror::Error;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Generation error: {0}")]
    GenerationError(#[from] crate::generation::GenerationError),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Output error: {0}")]
    OutputError(String),
}

/// Validation errors for requests
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Source cannot be empty")]
    EmptySource,

    #[error("Invalid API reference '{0}', expected <api>@<version>")]
    InvalidApiReference(String),
}
