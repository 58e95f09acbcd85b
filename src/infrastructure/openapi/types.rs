//! Swagger 2.0 document model
//!
//! Plain data mirroring the subset of the Swagger 2.0 object graph the synthesizer reads.
//! Optional collections default to empty so consumers never deal with missing values;
//! `paths` and `info` are required and their absence fails deserialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference prefix for entries of `Doc::definitions`
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";
/// Reference prefix for entries of `Doc::parameters`
pub const PARAMETERS_PREFIX: &str = "#/parameters/";
/// Reference prefix for entries of `Doc::responses`
pub const RESPONSES_PREFIX: &str = "#/responses/";

/// One security requirement: scheme name to required scopes (AND-combined)
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Root Swagger document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doc {
    /// Swagger version, expected to be "2.0"
    #[serde(default)]
    pub swagger: String,
    /// Metadata about the API
    pub info: Info,
    /// Host (name or ip) serving the API
    #[serde(default)]
    pub host: Option<String>,
    /// Base path relative to the host
    #[serde(default)]
    pub base_path: String,
    /// Transfer protocols of the API
    #[serde(default)]
    pub schemes: Vec<String>,
    /// Default MIME types the API consumes
    #[serde(default)]
    pub consumes: Vec<String>,
    /// Default MIME types the API produces
    #[serde(default)]
    pub produces: Vec<String>,
    /// Path templates and their operations
    pub paths: IndexMap<String, PathItem>,
    /// Named, reusable schemas
    #[serde(default)]
    pub definitions: IndexMap<String, Schema>,
    /// Named, reusable parameters
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
    /// Named, reusable responses
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
    /// Security schemes referenced by security requirements
    #[serde(default)]
    pub security_definitions: IndexMap<String, SecurityDefinition>,
    /// Default security requirement alternatives (OR-combined)
    #[serde(default)]
    pub security: Option<Vec<SecurityRequirement>>,
    /// Tag metadata
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Additional external documentation
    #[serde(default)]
    pub external_docs: Option<ExternalDocs>,
}

impl Doc {
    /// Looks up a shared parameter by its `$ref` string or bare name
    pub fn parameter(&self, reference: &str) -> Option<&Parameter> {
        let name = reference
            .strip_prefix(PARAMETERS_PREFIX)
            .unwrap_or(reference);
        self.parameters.get(name)
    }

    /// Looks up a shared response by its `$ref` string or bare name
    pub fn response(&self, reference: &str) -> Option<&Response> {
        let name = reference.strip_prefix(RESPONSES_PREFIX).unwrap_or(reference);
        self.responses.get(name)
    }
}

/// API metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub terms_of_service: Option<String>,
    #[serde(default)]
    pub contact: Option<Contact>,
    #[serde(default)]
    pub license: Option<License>,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "externalDocs")]
    pub external_docs: Option<ExternalDocs>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalDocs {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// HTTP methods a path item can carry, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    /// All methods in the fixed iteration order
    pub fn all() -> &'static [HttpMethod] {
        &[
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Post,
            HttpMethod::Delete,
            HttpMethod::Options,
            HttpMethod::Head,
            HttpMethod::Patch,
        ]
    }

    /// Upper-case method name, e.g. "GET"
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations available on a single path template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// External path item definition; carried but never followed
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub get: Option<Operation>,
    #[serde(default)]
    pub put: Option<Operation>,
    #[serde(default)]
    pub post: Option<Operation>,
    #[serde(default)]
    pub delete: Option<Operation>,
    #[serde(default)]
    pub options: Option<Operation>,
    #[serde(default)]
    pub head: Option<Operation>,
    #[serde(default)]
    pub patch: Option<Operation>,
    /// Parameters shared by every operation of this path
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// Operation declared for `method`, if any
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
        }
    }

    /// Declared operations keyed by method, in `HttpMethod::all()` order
    pub fn operations(&self) -> IndexMap<HttpMethod, &Operation> {
        HttpMethod::all()
            .iter()
            .filter_map(|method| self.operation(*method).map(|op| (*method, op)))
            .collect()
    }
}

/// A single HTTP-method handler
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub external_docs: Option<ExternalDocs>,
    /// Informational only; method names are derived from method and path
    #[serde(default)]
    pub operation_id: Option<String>,
    /// Overrides the document default when present, even if empty
    #[serde(default)]
    pub consumes: Option<Vec<String>>,
    /// Overrides the document default when present, even if empty
    #[serde(default)]
    pub produces: Option<Vec<String>>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
    #[serde(default)]
    pub schemes: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
    /// `Some(vec![])` disables the document default for this operation
    #[serde(default)]
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Where a parameter travels in the request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Body,
    /// Any other value (`formData`, typos, missing); kept verbatim for diagnostics
    Unsupported(String),
}

impl ParameterLocation {
    pub fn as_str(&self) -> &str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Path => "path",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
            ParameterLocation::Unsupported(raw) => raw,
        }
    }
}

impl Default for ParameterLocation {
    fn default() -> Self {
        ParameterLocation::Unsupported(String::new())
    }
}

impl From<String> for ParameterLocation {
    fn from(value: String) -> Self {
        match value.as_str() {
            "query" => ParameterLocation::Query,
            "path" => ParameterLocation::Path,
            "header" => ParameterLocation::Header,
            "body" => ParameterLocation::Body,
            _ => ParameterLocation::Unsupported(value),
        }
    }
}

impl From<ParameterLocation> for String {
    fn from(value: ParameterLocation) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter or reference to a shared parameter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// `#/parameters/<name>` when this is a reference
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    /// Present for body parameters only
    #[serde(default)]
    pub schema: Option<Schema>,
    #[serde(default, rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default, rename = "enum")]
    pub enum_values: Vec<serde_json::Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub items: Option<Box<Schema>>,
    #[serde(default)]
    pub collection_format: Option<String>,
}

impl Parameter {
    /// Non-empty `$ref`, if this parameter is a reference
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }

    /// Schema view of a non-body parameter's own type declaration
    pub fn schema_view(&self) -> Schema {
        Schema {
            reference: None,
            schema_type: self.schema_type.clone(),
            format: self.format.clone(),
            description: self.description.clone(),
            enum_values: self.enum_values.clone(),
            required: Vec::new(),
            items: self.items.clone(),
            properties: IndexMap::new(),
        }
    }
}

/// Response for one status code
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    /// `#/responses/<name>` when this is a reference
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Absent when the response has no body
    #[serde(default)]
    pub schema: Option<Schema>,
    #[serde(default)]
    pub headers: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub examples: IndexMap<String, serde_json::Value>,
}

impl Response {
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }
}

/// Declared `type` of a schema
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SchemaType {
    /// No type declared
    Empty,
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    File,
    Unknown(String),
}

impl SchemaType {
    pub fn as_str(&self) -> &str {
        match self {
            SchemaType::Empty => "",
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
            SchemaType::File => "file",
            SchemaType::Unknown(raw) => raw,
        }
    }
}

impl Default for SchemaType {
    fn default() -> Self {
        SchemaType::Empty
    }
}

impl From<String> for SchemaType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" => SchemaType::Empty,
            "string" => SchemaType::String,
            "integer" => SchemaType::Integer,
            "number" => SchemaType::Number,
            "boolean" => SchemaType::Boolean,
            "array" => SchemaType::Array,
            "object" => SchemaType::Object,
            "file" => SchemaType::File,
            _ => SchemaType::Unknown(value),
        }
    }
}

impl From<SchemaType> for String {
    fn from(value: SchemaType) -> Self {
        value.as_str().to_string()
    }
}

/// Schema or reference to a definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// `#/definitions/<name>` when this is a reference
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,
    #[serde(default, rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "enum")]
    pub enum_values: Vec<serde_json::Value>,
    /// Names of required properties
    #[serde(default)]
    pub required: Vec<String>,
    /// Element schema when `schema_type` is `Array`
    #[serde(default)]
    pub items: Option<Box<Schema>>,
    #[serde(default)]
    pub properties: IndexMap<String, Schema>,
}

impl Schema {
    /// Non-empty `$ref`, if this schema is a reference
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }

    /// True for an inline `type: object` schema that is not a reference
    pub fn is_inline_object(&self) -> bool {
        self.reference().is_none() && self.schema_type == SchemaType::Object
    }

    /// Whether `property` is listed in `required`
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}

/// Declared authentication scheme type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SecuritySchemeType {
    ApiKey,
    Basic,
    OAuth2,
    Other(String),
}

impl SecuritySchemeType {
    pub fn as_str(&self) -> &str {
        match self {
            SecuritySchemeType::ApiKey => "apiKey",
            SecuritySchemeType::Basic => "basic",
            SecuritySchemeType::OAuth2 => "oauth2",
            SecuritySchemeType::Other(raw) => raw,
        }
    }
}

impl Default for SecuritySchemeType {
    fn default() -> Self {
        SecuritySchemeType::Other(String::new())
    }
}

impl From<String> for SecuritySchemeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "apiKey" => SecuritySchemeType::ApiKey,
            "basic" => SecuritySchemeType::Basic,
            "oauth2" => SecuritySchemeType::OAuth2,
            _ => SecuritySchemeType::Other(value),
        }
    }
}

impl From<SecuritySchemeType> for String {
    fn from(value: SecuritySchemeType) -> Self {
        value.as_str().to_string()
    }
}

/// Where an API key travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeLocation {
    Header,
    Query,
}

/// How a named scheme authenticates a request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityDefinition {
    #[serde(default, rename = "type")]
    pub scheme_type: SecuritySchemeType,
    #[serde(default, rename = "in")]
    pub location: Option<SchemeLocation>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
