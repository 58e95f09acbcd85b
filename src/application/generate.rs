//! Use case for generating client interfaces

use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Instrument;

use crate::application::{
    ApplicationError, CatalogClient, GenerateResponse, OutcomeStatus, OutputService, SpecData,
    SpecOutcome, SpecSource, preferred_specs,
};
use crate::generation::{
    DEFAULT_INTERFACE_NAME, Doc, InterfacePrinter, InterfaceSynthesizer, SpecLoader, TracingSink,
};

/// Fetch → parse → synthesize → print → write, for one document or the whole catalog
pub struct GenerateUseCase {
    loader: Arc<dyn SpecLoader>,
    catalog: Arc<dyn CatalogClient>,
    printer: Arc<dyn InterfacePrinter>,
    output_service: Arc<dyn OutputService>,
    interface_name: String,
    concurrency: usize,
}

impl GenerateUseCase {
    pub fn new(
        loader: Arc<dyn SpecLoader>,
        catalog: Arc<dyn CatalogClient>,
        printer: Arc<dyn InterfacePrinter>,
        output_service: Arc<dyn OutputService>,
    ) -> Self {
        Self {
            loader,
            catalog,
            printer,
            output_service,
            interface_name: DEFAULT_INTERFACE_NAME.to_string(),
            concurrency: 1,
        }
    }

    pub fn with_interface_name(mut self, name: impl Into<String>) -> Self {
        self.interface_name = name.into();
        self
    }

    /// Number of catalog documents processed at once; at least 1
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run generation for `source`.
    ///
    /// Per-document failures become failed outcomes; only a failure to fetch the catalog
    /// listing aborts the run.
    pub async fn execute(&self, source: SpecSource) -> Result<GenerateResponse, ApplicationError> {
        let outcomes = match source {
            SpecSource::All => {
                let catalog = self.catalog.list().await?;
                let (specs, rejected) = claim_namespaces(preferred_specs(&catalog));
                tracing::info!(apis = specs.len(), concurrency = self.concurrency, "Generating catalog");

                let mut outcomes: Vec<SpecOutcome> = stream::iter(specs)
                    .map(|spec| self.from_catalog(spec))
                    .buffer_unordered(self.concurrency)
                    .collect()
                    .await;
                outcomes.extend(rejected);
                outcomes.sort_by(|a, b| a.spec.name.cmp(&b.spec.name));
                outcomes
            }
            SpecSource::Api { name, version } => {
                vec![self.from_catalog(SpecData::new(name, version)).await]
            }
            SpecSource::Uri(uri) => vec![self.from_uri(uri).await],
        };

        Ok(GenerateResponse { outcomes })
    }

    async fn from_catalog(&self, spec: SpecData) -> SpecOutcome {
        let span = tracing::info_span!("spec", spec = %spec);
        let result = async {
            let doc = self.catalog.fetch(&spec).await?;
            self.generate(&spec, &doc).await
        }
        .instrument(span)
        .await;
        outcome(spec, result)
    }

    async fn from_uri(&self, uri: String) -> SpecOutcome {
        let spec = SpecData::for_uri(&uri);
        let span = tracing::info_span!("spec", uri = %uri);
        let result = async {
            let doc = self.loader.load(&uri).await?;
            self.generate(&spec, &doc).await
        }
        .instrument(span)
        .await;
        outcome(spec, result)
    }

    /// Synthesize, print and write one document; returns the artifact path and the
    /// number of diagnostics reported
    pub async fn generate(
        &self,
        spec: &SpecData,
        doc: &Doc,
    ) -> Result<(PathBuf, usize), ApplicationError> {
        let synthesizer = InterfaceSynthesizer::new(spec.namespace(), &self.interface_name);
        let mut sink = TracingSink::new();
        let interface = synthesizer.synthesize(doc, &mut sink)?;
        let artifact = self.printer.print(&interface)?;
        let path = self.output_service.write_artifact(&artifact).await?;

        tracing::info!(
            path = %path.display(),
            methods = interface.methods.len(),
            types = interface.named_types.len(),
            warnings = sink.reported(),
            "Generated interface"
        );
        Ok((path, sink.reported()))
    }
}

/// Keeps the first spec of every namespace; later ones would overwrite its artifact
fn claim_namespaces(specs: Vec<SpecData>) -> (Vec<SpecData>, Vec<SpecOutcome>) {
    let mut owners: HashMap<String, String> = HashMap::new();
    let mut unique = Vec::with_capacity(specs.len());
    let mut rejected = Vec::new();

    for spec in specs {
        match owners.entry(spec.namespace()) {
            Entry::Vacant(slot) => {
                slot.insert(spec.to_string());
                unique.push(spec);
            }
            Entry::Occupied(owner) => {
                let error = ApplicationError::CatalogError(format!(
                    "Namespace '{}' is already used by {}",
                    owner.key(),
                    owner.get()
                ));
                rejected.push(outcome(spec, Err(error)));
            }
        }
    }

    (unique, rejected)
}

fn outcome(spec: SpecData, result: Result<(PathBuf, usize), ApplicationError>) -> SpecOutcome {
    let status = match result {
        Ok((path, diagnostics)) => OutcomeStatus::Generated { path, diagnostics },
        Err(e) => {
            tracing::error!(spec = %spec, error = %e, "Generation failed");
            OutcomeStatus::Failed {
                error: e.to_string(),
            }
        }
    };
    SpecOutcome { spec, status }
}
