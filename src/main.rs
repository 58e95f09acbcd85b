//! swaggen CLI entrypoint
//! Parses command-line arguments and dispatches to the generate use case.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::PathBuf;
use std::sync::Arc;
use swaggen::{
    application::{GenerateUseCase, OutcomeStatus, SpecSource},
    core::{Config, OutputFormat},
    infrastructure::{
        ApisGuruClient, FileSystemOutputService,
        openapi::{CompositeSpecLoader, HttpSpecLoader},
        printers::printer_for,
    },
};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

const EXAMPLES: &str = "\
Examples:
  swaggen all
  swaggen thetvdb.com@2.1.1
  swaggen file:///home/me/petstore.json
  swaggen http://petstore.swagger.io/v2/swagger.json";

#[derive(Parser, Debug)]
#[command(name = "swaggen")]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
struct Cli {
    /// `all` for every catalog API, `<api>@<version>` for one catalog entry, or a
    /// document URI or path
    source: String,

    /// Configuration file (defaults to ./swaggen.toml, then the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory receiving `<namespace>/<interface>.<ext>`
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Documents processed at once in catalog mode
    #[arg(long)]
    concurrency: Option<usize>,

    /// Name of the generated interface
    #[arg(long)]
    name: Option<String>,

    /// Catalog root URL
    #[arg(long)]
    catalog_url: Option<String>,
}

impl Cli {
    /// Configuration file values overridden by command-line flags
    async fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load(self.config.as_deref())
            .await
            .context("Failed to load configuration")?;

        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(name) = &self.name {
            config.interface_name = name.clone();
        }
        if let Some(catalog_url) = &self.catalog_url {
            config.catalog_url = catalog_url.clone();
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with default level INFO
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    let source: SpecSource = cli.source.parse().context("Invalid source")?;
    let config = cli.resolve_config().await?;
    info!(
        output_dir = %config.output_dir.display(),
        format = %config.format,
        "Starting swaggen"
    );

    let http = HttpSpecLoader::new(config.http_timeout()).context("Failed to create HTTP client")?;
    let catalog = ApisGuruClient::new(&config.catalog_url, http.clone())
        .context("Failed to configure catalog client")?;

    let use_case = GenerateUseCase::new(
        Arc::new(CompositeSpecLoader::with_http(http)),
        Arc::new(catalog),
        printer_for(config.format),
        Arc::new(FileSystemOutputService::new(&config.output_dir)),
    )
    .with_interface_name(&config.interface_name)
    .with_concurrency(config.concurrency);

    let response = use_case
        .execute(source)
        .await
        .context("Generation failed")?;

    for outcome in &response.outcomes {
        match &outcome.status {
            OutcomeStatus::Generated { path, diagnostics } => info!(
                spec = %outcome.spec,
                path = %path.display(),
                warnings = *diagnostics,
                "Wrote interface"
            ),
            OutcomeStatus::Failed { error } => error!(spec = %outcome.spec, "{error}"),
        }
    }

    info!(
        succeeded = response.succeeded(),
        failed = response.failed(),
        "Generation finished"
    );

    if response.failed() > 0 {
        anyhow::bail!(
            "{} of {} documents failed",
            response.failed(),
            response.outcomes.len()
        );
    }
    Ok(())
}
