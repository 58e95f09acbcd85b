//! End-to-end generation through the use case with real loaders, printers and output

use std::path::{Path, PathBuf};
use std::sync::Arc;
use swaggen::application::{GenerateUseCase, OutcomeStatus, SpecSource};
use swaggen::core::OutputFormat;
use swaggen::infrastructure::openapi::http_loader::DEFAULT_TIMEOUT;
use swaggen::infrastructure::openapi::{CompositeSpecLoader, HttpSpecLoader};
use swaggen::infrastructure::printers::printer_for;
use swaggen::infrastructure::{ApisGuruClient, FileSystemOutputService};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/petstore.swagger.json")
}

fn use_case(catalog_root: &str, format: OutputFormat, output: &Path) -> GenerateUseCase {
    let http = HttpSpecLoader::new(DEFAULT_TIMEOUT).unwrap();
    let catalog = ApisGuruClient::new(catalog_root, http.clone()).unwrap();
    GenerateUseCase::new(
        Arc::new(CompositeSpecLoader::with_http(http)),
        Arc::new(catalog),
        printer_for(format),
        Arc::new(FileSystemOutputService::new(output)),
    )
}

#[tokio::test]
async fn test_generate_json_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let source: SpecSource = fixture().display().to_string().parse().unwrap();

    let response = use_case("http://127.0.0.1:9/", OutputFormat::Json, temp_dir.path())
        .execute(source)
        .await
        .unwrap();

    assert_eq!(response.succeeded(), 1);
    let OutcomeStatus::Generated { path, diagnostics } = &response.outcomes[0].status else {
        panic!("Expected generated outcome: {:?}", response.outcomes[0]);
    };
    assert_eq!(*diagnostics, 3);
    assert_eq!(path, &temp_dir.path().join("api").join("api.json"));

    let content = std::fs::read_to_string(path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["title"], "Swagger Petstore");
    assert_eq!(json["methods"].as_array().unwrap().len(), 6);
    assert_eq!(json["methods"][0]["result"]["wrapper"], "stream");
    assert_eq!(json["capabilities"][0]["name"], "set_security_token");
}

#[tokio::test]
async fn test_generate_rust_trait_from_file_url() {
    let temp_dir = TempDir::new().unwrap();
    let uri = url::Url::from_file_path(fixture()).unwrap().to_string();

    let response = use_case("http://127.0.0.1:9/", OutputFormat::Rust, temp_dir.path())
        .with_interface_name("PetstoreClient")
        .execute(SpecSource::Uri(uri))
        .await
        .unwrap();

    assert_eq!(response.failed(), 0);
    let written = temp_dir.path().join("api").join("petstore_client.rs");
    let source = std::fs::read_to_string(&written).unwrap();

    assert!(source.contains("pub const BASE_PATH: &str = \"/v2\";"));
    assert!(source.contains("pub trait PetstoreClient {"));
    assert!(source.contains("fn get_pets("));
    assert!(source.contains("fn get_pets_2("));
    assert!(source.contains("#[deprecated]"));
    assert!(source.contains("pub mod petstore_client {"));
    assert!(source.contains("    pub struct Owner {"));
}

#[tokio::test]
async fn test_generate_catalog_with_failing_sibling() {
    let server = MockServer::start().await;
    let petstore = std::fs::read_to_string(fixture()).unwrap();
    let listing = serde_json::json!({
        "petstore.io": {
            "preferred": "1.0.0",
            "versions": {
                "0.9.0": {},
                "1.0.0": { "swaggerUrl": format!("{}/petstore.json", server.uri()) }
            }
        },
        "broken.com:v1": {
            "preferred": "2",
            "versions": { "2": {} }
        }
    });

    Mock::given(method("GET"))
        .and(path("/list.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/petstore.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(petstore),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/specs/broken.com/v1/2/swagger.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let response = use_case(&server.uri(), OutputFormat::Json, temp_dir.path())
        .with_concurrency(4)
        .execute(SpecSource::All)
        .await
        .unwrap();

    let names: Vec<_> = response.outcomes.iter().map(|o| o.spec.to_string()).collect();
    assert_eq!(names, vec!["broken.com:v1@2", "petstore.io@1.0.0"]);
    assert!(matches!(
        &response.outcomes[0].status,
        OutcomeStatus::Failed { error } if error.contains("404")
    ));
    assert!(response.outcomes[1].is_success());
    assert!(temp_dir.path().join("petstore_io").join("api.json").exists());
    assert!(!temp_dir.path().join("broken_com_v1").exists());
}

#[tokio::test]
async fn test_catalog_listing_failure_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let result = use_case(&server.uri(), OutputFormat::Json, temp_dir.path())
        .execute(SpecSource::All)
        .await;

    assert!(result.is_err());
}
