//! Port interfaces for the application layer

use async_trait::async_trait;
use std::path::PathBuf;

use crate::application::{ApplicationError, Catalog, SpecData};
use crate::generation::{Artifact, Doc};

/// Service for writing generated artifacts to the output destination
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write one artifact and return where it landed
    async fn write_artifact(&self, artifact: &Artifact) -> Result<PathBuf, ApplicationError>;
}

/// Directory of published API documents
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the full listing
    async fn list(&self) -> Result<Catalog, ApplicationError>;

    /// Fetch the document for `spec`
    async fn fetch(&self, spec: &SpecData) -> Result<Doc, ApplicationError>;
}
