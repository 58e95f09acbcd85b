//! Security annotation builder
//!
//! Only the first OR-alternative of a requirement list is honored: a generated client
//! picks one authentication strategy. Scheme names missing from `securityDefinitions`
//! are skipped.

use indexmap::IndexMap;

use crate::generation::{SecurityAnnotation, SecurityDefinition, SecurityRequirement, SecurityScheme};

/// Resolves the first alternative of `alternatives` against `definitions`
pub fn resolve_requirements(
    alternatives: &[SecurityRequirement],
    definitions: &IndexMap<String, SecurityDefinition>,
) -> Vec<SecurityScheme> {
    let Some(first) = alternatives.first() else {
        return Vec::new();
    };

    first
        .keys()
        .filter_map(|scheme| {
            definitions.get(scheme).map(|definition| SecurityScheme {
                scheme: scheme.clone(),
                scheme_type: definition.scheme_type.clone(),
                location: definition.location,
                name: definition.name.clone(),
            })
        })
        .collect()
}

/// Scheme names of the first alternative that have no definition
pub fn unknown_schemes<'a>(
    alternatives: &'a [SecurityRequirement],
    definitions: &IndexMap<String, SecurityDefinition>,
) -> Vec<&'a str> {
    alternatives
        .first()
        .map(|first| {
            first
                .keys()
                .filter(|scheme| !definitions.contains_key(*scheme))
                .map(String::as_str)
                .collect()
        })
        .unwrap_or_default()
}

/// Effective security of an operation.
///
/// - override present and empty: explicit `NoSecurity`
/// - override present and non-empty: replaces the document default
/// - override absent: the document default, when it declares at least one alternative
pub fn resolve_security(
    document_default: Option<&[SecurityRequirement]>,
    operation_override: Option<&[SecurityRequirement]>,
    definitions: &IndexMap<String, SecurityDefinition>,
) -> Option<SecurityAnnotation> {
    match operation_override {
        Some([]) => Some(SecurityAnnotation::NoSecurity),
        Some(alternatives) => Some(SecurityAnnotation::Schemes(resolve_requirements(
            alternatives,
            definitions,
        ))),
        None => match document_default {
            None | Some([]) => None,
            Some(alternatives) => Some(SecurityAnnotation::Schemes(resolve_requirements(
                alternatives,
                definitions,
            ))),
        },
    }
}
