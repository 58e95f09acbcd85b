//! File-based Swagger document loader
//!
//! This loader handles only file I/O. The actual parsing is done by the OpenApiParser.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use url::Url;

use super::parser::{OpenApiParser, SourceFormat};
use crate::generation::{Doc, GenerationError, SpecLoader};

/// Loads Swagger documents from local files, given as a path or a `file://` URL
#[derive(Debug, Default)]
pub struct FileSpecLoader;

impl FileSpecLoader {
    pub fn new() -> Self {
        Self
    }

    /// Filesystem path named by `source`
    pub fn resolve_path(source: &str) -> Result<PathBuf, GenerationError> {
        if !source.starts_with("file:") {
            return Ok(PathBuf::from(source));
        }

        Url::parse(source)
            .ok()
            .and_then(|url| url.to_file_path().ok())
            .ok_or_else(|| GenerationError::LoadError(format!("Invalid file URL: {source}")))
    }
}

#[async_trait]
impl SpecLoader for FileSpecLoader {
    async fn load(&self, source: &str) -> Result<Doc, GenerationError> {
        let path = Self::resolve_path(source)?;
        tracing::debug!(path = %path.display(), "Reading Swagger document");

        let content = fs::read_to_string(&path).await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to read {}: {e}", path.display()))
        })?;

        let format = SourceFormat::detect(None, &path.to_string_lossy());
        OpenApiParser::from_text(&content, format)?.parse()
    }
}
