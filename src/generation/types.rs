//! Core types for the generation domain
//!
//! Everything here is language-agnostic: printers decide how a `TargetType` or a
//! `MethodDescriptor` looks in a concrete language.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// Re-export the document model from the infrastructure module
pub use crate::infrastructure::openapi::{
    Contact, DEFINITIONS_PREFIX, Doc, ExternalDocs, HttpMethod, Info, License, Operation,
    PARAMETERS_PREFIX, Parameter, ParameterLocation, PathItem, RESPONSES_PREFIX, Response,
    Schema, SchemaType, SchemeLocation, SecurityDefinition, SecurityRequirement,
    SecuritySchemeType, Tag,
};

/// Fully qualified name of a generated type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedName {
    /// Enclosing namespaces, outermost first
    pub namespace: Vec<String>,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace: Vec<String>, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    /// Name of a type nested inside this one
    pub fn nested(&self, name: impl Into<String>) -> Self {
        let mut namespace = self.namespace.clone();
        namespace.push(self.name.clone());
        Self::new(namespace, name)
    }

    /// Segments joined with `separator`
    fn join(&self, separator: &str) -> String {
        self.namespace
            .iter()
            .chain(std::iter::once(&self.name))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join("."))
    }
}

/// How array schemas are wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayRepresentation {
    /// Fixed native array; used for fields of named types
    NativeArray,
    /// Growable sequence; used for operation parameters
    Sequence,
}

impl ArrayRepresentation {
    pub fn wrap(self, element: TargetType) -> TargetType {
        match self {
            ArrayRepresentation::NativeArray => TargetType::NativeArray(Box::new(element)),
            ArrayRepresentation::Sequence => TargetType::Sequence(Box::new(element)),
        }
    }
}

/// Language-agnostic description of a value type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TargetType {
    /// Opaque object used when nothing more specific is known
    Opaque,
    /// Boxed "no value"; the declared type was empty
    Void,
    String,
    /// Wide numeric type shared by `integer` and `number`
    Number,
    Boolean,
    NativeArray(Box<TargetType>),
    Sequence(Box<TargetType>),
    /// A generated type for a document definition
    Named(QualifiedName),
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetType::Opaque => f.write_str("object"),
            TargetType::Void => f.write_str("void"),
            TargetType::String => f.write_str("string"),
            TargetType::Number => f.write_str("number"),
            TargetType::Boolean => f.write_str("boolean"),
            TargetType::NativeArray(inner) => write!(f, "{inner}[]"),
            TargetType::Sequence(inner) => write!(f, "list<{inner}>"),
            TargetType::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Documentation carried alongside a type; never affects the mapped type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Documentation {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub enum_values: Vec<String>,
}

impl Documentation {
    /// Documentation for `schema`, falling back to `fallback` when it has no description
    pub fn for_schema(schema: &Schema, fallback: &str) -> Self {
        Self {
            summary: schema
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(fallback)
                .to_string(),
            format: schema.format.clone(),
            enum_values: enum_labels(&schema.enum_values),
        }
    }
}

/// Render enum values as plain labels
pub fn enum_labels(values: &[serde_json::Value]) -> Vec<String> {
    values
        .iter()
        .map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}

/// A field of a named type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub target_type: TargetType,
    pub required: bool,
    pub documentation: Documentation,
}

/// A generated type corresponding to one document definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedType {
    /// The `$ref` string that resolves to this type
    pub reference: String,
    pub name: QualifiedName,
    pub documentation: Documentation,
    pub fields: Vec<Field>,
}

/// How an argument is passed in the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "in", content = "name", rename_all = "snake_case")]
pub enum BindingKind {
    Query(String),
    Path(String),
    Header(String),
    /// The request body; carries no wire name
    Body,
    /// Unsupported location; passed without annotation
    Unbound,
}

/// One argument of a synthesized method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterBinding {
    /// Identifier-safe argument name
    pub name: String,
    pub kind: BindingKind,
    pub target_type: TargetType,
    pub optional: bool,
    pub documentation: Documentation,
}

/// Asynchronous wrapper of a method result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultWrapper {
    /// Zero or more values
    Stream,
    /// Exactly one value
    Single,
}

/// Result type of a synthesized method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultType {
    pub wrapper: ResultWrapper,
    pub item: TargetType,
}

impl ResultType {
    pub fn stream(item: TargetType) -> Self {
        Self {
            wrapper: ResultWrapper::Stream,
            item,
        }
    }

    pub fn single(item: TargetType) -> Self {
        Self {
            wrapper: ResultWrapper::Single,
            item,
        }
    }

    /// A stream that completes without values
    pub fn no_value() -> Self {
        Self::stream(TargetType::Void)
    }
}

/// A resolved security scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// Key of the scheme in `securityDefinitions`
    pub scheme: String,
    pub scheme_type: SecuritySchemeType,
    pub location: Option<SchemeLocation>,
    /// Header or query parameter name carrying the credential
    pub name: Option<String>,
}

/// Security metadata attached to an interface or a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "schemes", rename_all = "snake_case")]
pub enum SecurityAnnotation {
    /// Explicitly unauthenticated
    NoSecurity,
    /// All listed schemes apply together
    Schemes(Vec<SecurityScheme>),
}

/// One synthesized operation method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub http_method: HttpMethod,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    pub documentation: String,
    pub deprecated: bool,
    pub parameters: Vec<ParameterBinding>,
    pub result: ResultType,
    /// Present only when the operation overrides the document default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityAnnotation>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
}

/// A method of the interface that does not map to any operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityMethod {
    pub name: String,
    pub parameters: Vec<(String, TargetType)>,
    pub documentation: String,
}

impl CapabilityMethod {
    /// Runtime hook for configuring authentication tokens
    pub fn token_setter() -> Self {
        Self {
            name: "set_security_token".to_string(),
            parameters: vec![
                ("token_name".to_string(), TargetType::String),
                ("token_value".to_string(), TargetType::String),
            ],
            documentation: "Sets the credential sent for the named security scheme.".to_string(),
        }
    }
}

/// Language-agnostic description of a generated client interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedInterface {
    pub name: QualifiedName,
    pub title: String,
    pub base_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_security: Option<SecurityAnnotation>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub named_types: Vec<NamedType>,
    pub methods: Vec<MethodDescriptor>,
    pub capabilities: Vec<CapabilityMethod>,
}

/// Generated artifact
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Path relative to the output directory
    pub path: PathBuf,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_nesting() {
        let api = QualifiedName::new(vec!["petstore_io".to_string()], "Api");
        let pet = api.nested("Pet");

        assert_eq!(pet.namespace, vec!["petstore_io", "Api"]);
        assert_eq!(pet.to_string(), "petstore_io.Api.Pet");
        assert_eq!(pet.join("::"), "petstore_io::Api::Pet");
    }

    #[test]
    fn test_array_representation_wrap() {
        assert_eq!(
            ArrayRepresentation::Sequence.wrap(TargetType::String),
            TargetType::Sequence(Box::new(TargetType::String))
        );
        assert_eq!(
            ArrayRepresentation::NativeArray
                .wrap(TargetType::Number)
                .to_string(),
            "number[]"
        );
    }

    #[test]
    fn test_documentation_fallback_and_enum_labels() {
        let schema = Schema {
            format: Some("int32".to_string()),
            enum_values: vec![serde_json::json!("a"), serde_json::json!(2)],
            ..Default::default()
        };

        let doc = Documentation::for_schema(&schema, "count");
        assert_eq!(doc.summary, "count");
        assert_eq!(doc.format.as_deref(), Some("int32"));
        assert_eq!(doc.enum_values, vec!["a", "2"]);
    }

    #[test]
    fn test_token_setter_shape() {
        let setter = CapabilityMethod::token_setter();
        assert_eq!(setter.name, "set_security_token");
        assert_eq!(setter.parameters.len(), 2);
        assert!(
            setter
                .parameters
                .iter()
                .all(|(_, ty)| *ty == TargetType::String)
        );
    }
}
