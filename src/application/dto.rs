//! Data transfer objects for the application layer

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::application::ValidationError;
use crate::generation::utils::namespace_for_api;

/// What to generate, as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    /// The preferred version of every API in the catalog
    All,
    /// One catalog entry
    Api { name: String, version: String },
    /// A document URI or local path
    Uri(String),
}

impl FromStr for SpecSource {
    type Err = ValidationError;

    /// `all`, `<api>@<version>`, or anything else as a URI/path.
    ///
    /// A string containing `://` is always a URI; otherwise the last `@` splits an API
    /// identifier from its version.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::EmptySource);
        }
        if s.eq_ignore_ascii_case("all") {
            return Ok(SpecSource::All);
        }
        if s.contains("://") {
            return Ok(SpecSource::Uri(s.to_string()));
        }
        match s.rsplit_once('@') {
            Some((name, version)) if !name.is_empty() && !version.is_empty() => {
                Ok(SpecSource::Api {
                    name: name.to_string(),
                    version: version.to_string(),
                })
            }
            Some(_) => Err(ValidationError::InvalidApiReference(s.to_string())),
            None => Ok(SpecSource::Uri(s.to_string())),
        }
    }
}

/// A document to generate, identified by API name and version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecData {
    /// Catalog identifier, e.g. `googleapis.com:admin`
    pub name: String,
    pub version: String,
    /// Where to fetch the document from, when known up front
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger_url: Option<String>,
}

impl SpecData {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            swagger_url: None,
        }
    }

    /// Placeholder identity used for documents loaded by URI
    pub fn for_uri(uri: impl Into<String>) -> Self {
        Self {
            swagger_url: Some(uri.into()),
            ..Self::new("api", "0")
        }
    }

    /// Namespace the generated interface lives in
    pub fn namespace(&self) -> String {
        namespace_for_api(&self.name)
    }
}

impl fmt::Display for SpecData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// One version entry of the catalog listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogVersion {
    #[serde(default)]
    pub swagger_url: Option<String>,
    #[serde(default)]
    pub swagger_yaml_url: Option<String>,
    #[serde(default)]
    pub added: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub info: Option<serde_json::Value>,
}

/// One API of the catalog listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogApi {
    #[serde(default)]
    pub added: Option<String>,
    pub preferred: String,
    #[serde(default)]
    pub versions: BTreeMap<String, CatalogVersion>,
}

/// Catalog listing: API identifier to entry
pub type Catalog = BTreeMap<String, CatalogApi>;

/// Preferred version of every catalog API, in identifier order
pub fn preferred_specs(catalog: &Catalog) -> Vec<SpecData> {
    catalog
        .iter()
        .map(|(name, api)| SpecData {
            swagger_url: api
                .versions
                .get(&api.preferred)
                .and_then(|v| v.swagger_url.clone()),
            ..SpecData::new(name.clone(), api.preferred.clone())
        })
        .collect()
}

/// Result of processing one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Generated {
        path: PathBuf,
        diagnostics: usize,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecOutcome {
    pub spec: SpecData,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl SpecOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Generated { .. })
    }
}

/// Summary of a generation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateResponse {
    pub outcomes: Vec<SpecOutcome>,
}

impl GenerateResponse {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}
