//! Composite loader dispatching on the source scheme

use async_trait::async_trait;
use std::time::Duration;

use super::{FileSpecLoader, HttpSpecLoader};
use crate::generation::{Doc, GenerationError, SpecLoader};

/// Routes HTTP(S) URLs to the HTTP loader and everything else to the file loader
#[derive(Debug, Clone)]
pub struct CompositeSpecLoader {
    http: HttpSpecLoader,
}

impl CompositeSpecLoader {
    pub fn new(timeout: Duration) -> Result<Self, GenerationError> {
        Ok(Self {
            http: HttpSpecLoader::new(timeout)?,
        })
    }

    pub fn with_http(http: HttpSpecLoader) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SpecLoader for CompositeSpecLoader {
    async fn load(&self, source: &str) -> Result<Doc, GenerationError> {
        if HttpSpecLoader::handles(source) {
            tracing::debug!(source = %source, "Using HTTP loader");
            self.http.load(source).await
        } else {
            tracing::debug!(source = %source, "Using file loader");
            FileSpecLoader::new().load(source).await
        }
    }
}
