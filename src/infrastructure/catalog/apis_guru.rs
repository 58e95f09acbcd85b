//! APIs.guru catalog client
//!
//! The listing lives at `<root>/list.json`. Documents are fetched from the version's
//! `swaggerUrl` when the listing provides one, else from
//! `<root>/specs/<api>/<version>/swagger.json` with `:` in the identifier mapped to `/`.

use async_trait::async_trait;
use url::Url;

use crate::application::{ApplicationError, Catalog, CatalogClient, SpecData};
use crate::generation::{Doc, SpecLoader};
use crate::infrastructure::openapi::HttpSpecLoader;

/// Catalog client for an APIs.guru compatible directory
#[derive(Debug, Clone)]
pub struct ApisGuruClient {
    root: Url,
    http: HttpSpecLoader,
}

impl ApisGuruClient {
    pub fn new(root: &str, http: HttpSpecLoader) -> Result<Self, ApplicationError> {
        let mut root = root.to_string();
        if !root.ends_with('/') {
            root.push('/');
        }
        let root = Url::parse(&root)
            .map_err(|e| ApplicationError::CatalogError(format!("Invalid catalog URL '{root}': {e}")))?;
        Ok(Self { root, http })
    }

    pub fn list_url(&self) -> Result<Url, ApplicationError> {
        self.join("list.json")
    }

    /// Conventional document location for an API version
    pub fn spec_url(&self, api: &str, version: &str) -> Result<Url, ApplicationError> {
        self.join(&format!(
            "specs/{}/{version}/swagger.json",
            api.replace(':', "/")
        ))
    }

    fn join(&self, relative: &str) -> Result<Url, ApplicationError> {
        self.root
            .join(relative)
            .map_err(|e| ApplicationError::CatalogError(format!("Invalid catalog path '{relative}': {e}")))
    }
}

#[async_trait]
impl CatalogClient for ApisGuruClient {
    async fn list(&self) -> Result<Catalog, ApplicationError> {
        let url = self.list_url()?;
        tracing::info!(url = %url, "Fetching catalog listing");

        let (content, _) = self
            .http
            .fetch_text(url.as_str())
            .await
            .map_err(|e| ApplicationError::CatalogError(e.to_string()))?;

        let catalog: Catalog = serde_json::from_str(&content).map_err(|e| {
            ApplicationError::CatalogError(format!("Malformed catalog listing: {e}"))
        })?;
        tracing::debug!(apis = catalog.len(), "Catalog listing parsed");
        Ok(catalog)
    }

    async fn fetch(&self, spec: &SpecData) -> Result<Doc, ApplicationError> {
        let url = match &spec.swagger_url {
            Some(url) => url.clone(),
            None => self.spec_url(&spec.name, &spec.version)?.to_string(),
        };
        tracing::debug!(spec = %spec, url = %url, "Fetching document");
        Ok(self.http.load(&url).await?)
    }
}
