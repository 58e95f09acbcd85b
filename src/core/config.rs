//! Runtime configuration
//!
//! Settings come from a TOML file; command-line flags override individual values.
//! Lookup order: an explicit `--config` path, `./swaggen.toml`, then
//! `<config dir>/swaggen/config.toml`. With no file present the defaults apply.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use super::error::{Error, Result};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "swaggen.toml";

/// Default APIs.guru catalog root
pub const DEFAULT_CATALOG_URL: &str = "https://api.apis.guru/v2/";

/// Source text flavor written for each interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Language-agnostic JSON description
    #[default]
    Json,
    /// Rust trait declaration
    Rust,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Rust => f.write_str("rust"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "rust" | "rs" => Ok(OutputFormat::Rust),
            other => Err(Error::config(format!("Unknown output format: {other}"))),
        }
    }
}

/// Generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory for generated artifacts
    pub output_dir: PathBuf,
    /// Catalog root URL; `list.json` and `specs/` are resolved against it
    pub catalog_url: String,
    /// Number of specs processed at once in catalog mode
    pub concurrency: usize,
    pub format: OutputFormat,
    /// Name of the generated interface inside its namespace
    pub interface_name: String,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated"),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            concurrency: 8,
            format: OutputFormat::default(),
            interface_name: "Api".to_string(),
            http_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Parse a configuration file
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Candidate files in lookup order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            locations.push(config_dir.join("swaggen").join("config.toml"));
        }
        locations
    }

    /// Load from `explicit`, else the first existing search path, else defaults.
    ///
    /// An explicit path that does not exist is an error.
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "Loading configuration");
            return Self::from_file(path).await;
        }

        for path in Self::search_paths() {
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                tracing::debug!(path = %path.display(), "Loading configuration");
                return Self::from_file(&path).await;
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(Error::config("concurrency must be at least 1"));
        }
        if self.interface_name.trim().is_empty() {
            return Err(Error::config("interface_name cannot be empty"));
        }
        url::Url::parse(&self.catalog_url)
            .map_err(|e| Error::config(format!("Invalid catalog_url '{}': {e}", self.catalog_url)))?;
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
