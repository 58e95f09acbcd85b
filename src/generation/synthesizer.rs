//! Interface synthesizer - turns a document into a `GeneratedInterface`
//!
//! The pipeline is strictly sequential: the definition registry is built first, the
//! validation pass reports unsupported shapes, then every path × method pair becomes one
//! method descriptor.

use std::collections::HashMap;

use crate::generation::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::generation::registry::{TypeMapper, build_registry};
use crate::generation::security::{resolve_security, unknown_schemes};
use crate::generation::utils::{binding_name, derive_operation_name, trim_slash};
use crate::generation::validation::check_unsupported_schema_usage;
use crate::generation::{
    BindingKind, CapabilityMethod, Doc, Documentation, GeneratedInterface, GenerationError,
    HttpMethod, MethodDescriptor, Operation, Parameter, ParameterBinding, ParameterLocation,
    QualifiedName, ResultType, SchemaType, SecurityRequirement, enum_labels,
};

/// Name of the generated interface inside its namespace
pub const DEFAULT_INTERFACE_NAME: &str = "Api";

/// Builds the abstract interface for a document
#[derive(Debug, Clone)]
pub struct InterfaceSynthesizer {
    interface: QualifiedName,
}

impl InterfaceSynthesizer {
    /// Synthesizer emitting `interface_name` inside `namespace`
    pub fn new(namespace: impl Into<String>, interface_name: impl Into<String>) -> Self {
        Self {
            interface: QualifiedName::new(vec![namespace.into()], interface_name),
        }
    }

    /// Fully qualified name of the interface being generated
    pub fn interface(&self) -> &QualifiedName {
        &self.interface
    }

    /// Synthesize the interface for `doc`, reporting warnings to `sink`.
    ///
    /// Fails only when an operation references a parameter that does not exist; no
    /// partial interface is returned in that case.
    pub fn synthesize(
        &self,
        doc: &Doc,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<GeneratedInterface, GenerationError> {
        tracing::info!(title = %doc.info.title, interface = %self.interface, "Synthesizing interface");

        let registry = build_registry(&doc.definitions, &self.interface);
        if registry.is_empty() {
            tracing::debug!("Document declares no definitions");
        }
        let mapper = registry.mapper();
        check_unsupported_schema_usage(doc, sink);

        let default_security = doc.security.as_deref().and_then(|alternatives| {
            report_unknown_schemes(doc, alternatives, "#/security", sink);
            resolve_security(Some(alternatives), None, &doc.security_definitions)
        });

        let mut methods = Vec::new();
        for (path, item) in &doc.paths {
            for (method, operation) in item.operations() {
                methods.push(self.synthesize_method(doc, &mapper, path, method, operation, sink)?);
            }
        }
        report_duplicate_names(&methods, sink);

        let named_types = registry.named_types();
        tracing::debug!(
            methods = methods.len(),
            named_types = named_types.len(),
            "Interface synthesized"
        );

        Ok(GeneratedInterface {
            name: self.interface.clone(),
            title: doc.info.title.clone(),
            base_path: doc.base_path.clone(),
            default_security,
            consumes: doc.consumes.clone(),
            produces: doc.produces.clone(),
            named_types,
            methods,
            capabilities: vec![CapabilityMethod::token_setter()],
        })
    }

    fn synthesize_method(
        &self,
        doc: &Doc,
        mapper: &TypeMapper<'_, '_>,
        path: &str,
        method: HttpMethod,
        operation: &Operation,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<MethodDescriptor, GenerationError> {
        let pointer = format!("#/paths/{}/operations/{method}", trim_slash(path));

        let parameters = operation
            .parameters
            .iter()
            .map(|parameter| {
                let resolved = resolve_parameter(doc, parameter, method, path)?;
                Ok(bind_parameter(mapper, resolved, &pointer, sink))
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;

        let security = operation.security.as_deref().and_then(|alternatives| {
            report_unknown_schemes(doc, alternatives, &format!("{pointer}/security"), sink);
            resolve_security(
                doc.security.as_deref(),
                Some(alternatives),
                &doc.security_definitions,
            )
        });

        Ok(MethodDescriptor {
            name: derive_operation_name(method, path),
            http_method: method,
            path: path.to_string(),
            operation_id: operation.operation_id.clone(),
            documentation: operation
                .description
                .clone()
                .or_else(|| operation.summary.clone())
                .unwrap_or_default(),
            deprecated: operation.deprecated,
            parameters,
            result: resolve_result(doc, mapper, operation, &pointer, sink),
            security,
            consumes: operation
                .consumes
                .clone()
                .unwrap_or_else(|| doc.consumes.clone()),
            produces: operation
                .produces
                .clone()
                .unwrap_or_else(|| doc.produces.clone()),
        })
    }
}

/// Follows a `#/parameters/` reference; concrete parameters pass through
fn resolve_parameter<'a>(
    doc: &'a Doc,
    parameter: &'a Parameter,
    method: HttpMethod,
    path: &str,
) -> Result<&'a Parameter, GenerationError> {
    match parameter.reference() {
        None => Ok(parameter),
        Some(reference) => {
            doc.parameter(reference)
                .ok_or_else(|| GenerationError::UnresolvedParameter {
                    reference: reference.to_string(),
                    method: method.to_string(),
                    path: path.to_string(),
                })
        }
    }
}

fn bind_parameter(
    mapper: &TypeMapper<'_, '_>,
    parameter: &Parameter,
    pointer: &str,
    sink: &mut dyn DiagnosticSink,
) -> ParameterBinding {
    let kind = match &parameter.location {
        ParameterLocation::Query => BindingKind::Query(parameter.name.clone()),
        ParameterLocation::Path => BindingKind::Path(parameter.name.clone()),
        ParameterLocation::Header => BindingKind::Header(parameter.name.clone()),
        ParameterLocation::Body => BindingKind::Body,
        ParameterLocation::Unsupported(raw) => {
            sink.report(Diagnostic::new(
                DiagnosticKind::UnsupportedParameterLocation,
                format!("{pointer}/parameters/{}", parameter.name),
                format!("unsupported 'in' value '{raw}' for parameter '{}'", parameter.name),
            ));
            BindingKind::Unbound
        }
    };

    ParameterBinding {
        name: binding_name(&parameter.name),
        kind,
        target_type: mapper.resolve_parameter_type(parameter),
        optional: !parameter.required,
        documentation: Documentation {
            summary: parameter
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| parameter.name.clone()),
            format: parameter.format.clone(),
            enum_values: enum_labels(&parameter.enum_values),
        },
    }
}

/// Result type from the `200` response; every other status code is ignored
fn resolve_result(
    doc: &Doc,
    mapper: &TypeMapper<'_, '_>,
    operation: &Operation,
    pointer: &str,
    sink: &mut dyn DiagnosticSink,
) -> ResultType {
    let Some(response) = operation.responses.get("200") else {
        return ResultType::no_value();
    };

    let response = match response.reference() {
        None => response,
        Some(reference) => match doc.response(reference) {
            Some(shared) => shared,
            None => {
                sink.report(Diagnostic::new(
                    DiagnosticKind::UnresolvedResponse,
                    format!("{pointer}/responses/200"),
                    format!("response reference '{reference}' does not resolve"),
                ));
                return ResultType::no_value();
            }
        },
    };

    match &response.schema {
        None => ResultType::no_value(),
        Some(schema) if schema.schema_type == SchemaType::Array => {
            ResultType::stream(mapper.resolve_field_type(schema.items.as_deref()))
        }
        Some(schema) => ResultType::single(mapper.resolve_field_type(Some(schema))),
    }
}

fn report_unknown_schemes(
    doc: &Doc,
    alternatives: &[SecurityRequirement],
    location: &str,
    sink: &mut dyn DiagnosticSink,
) {
    for scheme in unknown_schemes(alternatives, &doc.security_definitions) {
        sink.report(Diagnostic::new(
            DiagnosticKind::UnknownSecurityScheme,
            location,
            format!("security scheme '{scheme}' is not declared in securityDefinitions"),
        ));
    }
}

fn report_duplicate_names(methods: &[MethodDescriptor], sink: &mut dyn DiagnosticSink) {
    let mut seen: HashMap<&str, &MethodDescriptor> = HashMap::new();
    for method in methods {
        if let Some(first) = seen.get(method.name.as_str()) {
            sink.report(Diagnostic::new(
                DiagnosticKind::DuplicateMethodName,
                format!(
                    "#/paths/{}/operations/{}",
                    trim_slash(&method.path),
                    method.http_method
                ),
                format!(
                    "method name '{}' is also derived for {} {}",
                    method.name, first.http_method, first.path
                ),
            ));
        } else {
            seen.insert(method.name.as_str(), method);
        }
    }
}
