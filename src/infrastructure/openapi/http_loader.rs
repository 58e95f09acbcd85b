//! HTTP-based Swagger document loader

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::parser::{OpenApiParser, SourceFormat};
use crate::generation::{Doc, GenerationError, SpecLoader};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the shared HTTP client used for documents and the catalog
pub fn build_client(timeout: Duration) -> Result<Client, GenerationError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .map_err(|e| GenerationError::LoadError(format!("Failed to create HTTP client: {e}")))
}

/// Loads Swagger documents from HTTP/HTTPS URLs
#[derive(Debug, Clone)]
pub struct HttpSpecLoader {
    client: Client,
}

impl HttpSpecLoader {
    pub fn new(timeout: Duration) -> Result<Self, GenerationError> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }

    /// Whether `source` is an HTTP(S) URL
    pub fn handles(source: &str) -> bool {
        source.starts_with("http://") || source.starts_with("https://")
    }

    /// Fetch `source` and return its body along with the content type
    pub async fn fetch_text(&self, source: &str) -> Result<(String, Option<String>), GenerationError> {
        let response = self.client.get(source).send().await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to fetch {source}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::LoadError(format!(
                "HTTP {status} when fetching {source}"
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let content = response.text().await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to read response body: {e}"))
        })?;

        Ok((content, content_type))
    }
}

#[async_trait]
impl SpecLoader for HttpSpecLoader {
    async fn load(&self, source: &str) -> Result<Doc, GenerationError> {
        if !Self::handles(source) {
            return Err(GenerationError::LoadError(format!(
                "HttpSpecLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        tracing::debug!(url = %source, "Fetching Swagger document");
        let (content, content_type) = self.fetch_text(source).await?;
        let format = SourceFormat::detect(content_type.as_deref(), source);
        OpenApiParser::from_text(&content, format)?.parse()
    }
}
