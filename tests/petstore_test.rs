//! Integration tests synthesizing the petstore fixture end to end

use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use swaggen::generation::{
    BindingKind, Diagnostic, DiagnosticKind, Doc, GeneratedInterface, InterfaceSynthesizer,
    ResultType, SchemeLocation, SecurityAnnotation, SecuritySchemeType, SpecLoader, TargetType,
};
use swaggen::infrastructure::openapi::FileSpecLoader;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/petstore.swagger.json")
}

async fn load() -> Doc {
    FileSpecLoader::new()
        .load(fixture().to_str().unwrap())
        .await
        .expect("fixture should load")
}

async fn synthesize() -> (GeneratedInterface, Vec<Diagnostic>) {
    let doc = load().await;
    let mut sink = Vec::new();
    let iface = InterfaceSynthesizer::new("api", "Api")
        .synthesize(&doc, &mut sink)
        .expect("fixture should synthesize");
    (iface, sink)
}

fn pet() -> TargetType {
    TargetType::Named(swaggen::generation::QualifiedName::new(
        vec!["api".to_string(), "Api".to_string()],
        "Pet",
    ))
}

#[tokio::test]
async fn test_methods_in_document_order() {
    let (iface, _) = synthesize().await;

    let signatures: Vec<_> = iface
        .methods
        .iter()
        .map(|m| format!("{} {} {}", m.name, m.http_method, m.path))
        .collect();
    assert_eq!(
        signatures,
        vec![
            "get_pets GET /pets",
            "post_pets POST /pets",
            "get_pets GET /pets/{id}",
            "delete_pets DELETE /pets/{id}",
            "post_pets_photo POST /pets/{id}/photo",
            "get_health GET /health",
        ]
    );
    assert_eq!(iface.base_path, "/v2");
    assert_eq!(iface.title, "Swagger Petstore");
}

#[tokio::test]
async fn test_list_pets_parameters_and_result() {
    let (iface, _) = synthesize().await;
    let list = &iface.methods[0];

    let bindings: Vec<_> = list
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.kind.clone(), p.target_type.clone(), p.optional))
        .collect();
    assert_eq!(
        bindings,
        vec![
            (
                "limit",
                BindingKind::Query("limit".to_string()),
                TargetType::Number,
                true
            ),
            (
                "tags",
                BindingKind::Query("tags".to_string()),
                TargetType::Sequence(Box::new(TargetType::String)),
                true
            ),
            (
                "XRequestId",
                BindingKind::Header("X-Request-Id".to_string()),
                TargetType::String,
                true
            ),
        ]
    );
    assert_eq!(list.parameters[0].documentation.summary, "Maximum number of results");
    assert_eq!(list.parameters[0].documentation.format.as_deref(), Some("int32"));
    assert_eq!(list.result, ResultType::stream(pet()));
    assert_eq!(list.security, None);
    assert_eq!(list.operation_id.as_deref(), Some("findPets"));
}

#[tokio::test]
async fn test_results_and_security_overrides() {
    let (iface, _) = synthesize().await;

    let add = &iface.methods[1];
    assert_eq!(add.result, ResultType::single(pet()));
    assert_eq!(add.parameters[0].kind, BindingKind::Body);
    assert!(!add.parameters[0].optional);
    match &add.security {
        Some(SecurityAnnotation::Schemes(schemes)) => {
            assert_eq!(schemes.len(), 1);
            assert_eq!(schemes[0].scheme, "petstore_auth");
            assert_eq!(schemes[0].scheme_type, SecuritySchemeType::OAuth2);
        }
        other => panic!("Expected first alternative only, got {other:?}"),
    }

    assert_eq!(iface.methods[2].result, ResultType::single(pet()));
    assert_eq!(iface.methods[3].result, ResultType::no_value());
    assert_eq!(iface.methods[4].result, ResultType::single(TargetType::Opaque));

    let health = &iface.methods[5];
    assert_eq!(health.security, Some(SecurityAnnotation::NoSecurity));
    assert!(health.deprecated);
    assert_eq!(health.result, ResultType::no_value());

    match &iface.default_security {
        Some(SecurityAnnotation::Schemes(schemes)) => {
            assert_eq!(schemes[0].scheme, "api_key");
            assert_eq!(schemes[0].location, Some(SchemeLocation::Header));
            assert_eq!(schemes[0].name.as_deref(), Some("X-Api-Key"));
        }
        other => panic!("Expected default api_key scheme, got {other:?}"),
    }
}

#[tokio::test]
async fn test_named_types_and_diagnostics() {
    let (iface, sink) = synthesize().await;

    let names: Vec<_> = iface.named_types.iter().map(|t| t.name.to_string()).collect();
    assert_eq!(
        names,
        vec!["api.Api.Error", "api.Api.NewPet", "api.Api.Owner", "api.Api.Pet", "api.Api.Tag"]
    );

    let owner = &iface.named_types[2];
    assert_eq!(owner.documentation.summary, "Person owning pets");
    assert_eq!(
        owner.fields[1].target_type,
        TargetType::NativeArray(Box::new(pet()))
    );

    let kinds: Vec<_> = sink.iter().map(|d| (d.kind, d.location.as_str())).collect();
    assert_eq!(
        kinds,
        vec![
            (
                DiagnosticKind::InlineObjectSchema,
                "#/paths/pets/{id}/photo/operations/POST/responses/200"
            ),
            (
                DiagnosticKind::UnsupportedParameterLocation,
                "#/paths/pets/{id}/photo/operations/POST/parameters/file"
            ),
            (
                DiagnosticKind::DuplicateMethodName,
                "#/paths/pets/{id}/operations/GET"
            ),
        ]
    );
}
