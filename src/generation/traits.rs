//! Port interfaces for the generation domain

use crate::generation::{Artifact, Doc, GeneratedInterface, GenerationError};
use async_trait::async_trait;

/// Loads Swagger documents
#[async_trait]
pub trait SpecLoader: Send + Sync {
    /// Load and parse a document from a URI or path
    async fn load(&self, source: &str) -> Result<Doc, GenerationError>;
}

/// Turns an abstract interface description into source text
pub trait InterfacePrinter: Send + Sync {
    /// File extension of the produced artifact, without the dot
    fn extension(&self) -> &'static str;

    /// Render `interface` into a single artifact
    fn print(&self, interface: &GeneratedInterface) -> Result<Artifact, GenerationError>;
}
