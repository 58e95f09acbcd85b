//! Swagger 2.0 document parser
//!
//! Loaders only fetch bytes; this module turns raw JSON or YAML text into the typed
//! document model, checking the required top-level fields first so that failures carry
//! a clear cause instead of a generic decode message.

use serde_json::Value as JsonValue;

use crate::generation::{Doc, GenerationError};

/// Format hint used to pick the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
    /// Try JSON first, then YAML
    Unknown,
}

impl SourceFormat {
    /// Guess the format from a content type and/or the source name
    pub fn detect(content_type: Option<&str>, source: &str) -> Self {
        let content_type = content_type.unwrap_or("");
        if content_type.contains("json") || source.ends_with(".json") {
            SourceFormat::Json
        } else if content_type.contains("yaml")
            || source.ends_with(".yaml")
            || source.ends_with(".yml")
        {
            SourceFormat::Yaml
        } else {
            SourceFormat::Unknown
        }
    }
}

/// Decode raw text into a JSON value according to `format`
pub fn decode(content: &str, format: SourceFormat) -> Result<JsonValue, GenerationError> {
    match format {
        SourceFormat::Json => {
            serde_json::from_str(content).map_err(GenerationError::SerializationError)
        }
        SourceFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| GenerationError::LoadError(format!("Failed to parse YAML: {e}"))),
        SourceFormat::Unknown => serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| {
                GenerationError::LoadError(format!("Failed to parse Swagger document: {e}"))
            }),
    }
}

/// Parses a decoded JSON value into the document model
pub struct OpenApiParser {
    /// The raw JSON value of the document
    pub json: JsonValue,
}

impl OpenApiParser {
    /// Create a new parser from JSON content
    pub fn new(json: JsonValue) -> Self {
        Self { json }
    }

    /// Decode `content` and build a parser for it
    pub fn from_text(content: &str, format: SourceFormat) -> Result<Self, GenerationError> {
        decode(content, format).map(Self::new)
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the declared Swagger or OpenAPI version
    pub fn spec_version(&self) -> Option<&str> {
        self.json
            .get("swagger")
            .or_else(|| self.json.get("openapi"))
            .and_then(JsonValue::as_str)
    }

    /// Parse the complete document
    pub fn parse(self) -> Result<Doc, GenerationError> {
        let root = self.json.as_object().ok_or_else(|| {
            GenerationError::ValidationError("Document root must be an object".to_string())
        })?;

        if !root.get("info").is_some_and(JsonValue::is_object) {
            return Err(GenerationError::ValidationError(
                "Missing 'info' object".to_string(),
            ));
        }
        if self.title().is_none() {
            return Err(GenerationError::ValidationError(
                "Missing info.title".to_string(),
            ));
        }

        let paths = root
            .get("paths")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| {
                GenerationError::ValidationError("Missing 'paths' object".to_string())
            })?;
        if paths.is_empty() {
            return Err(GenerationError::ValidationError(
                "Document declares no paths".to_string(),
            ));
        }

        match self.spec_version() {
            Some("2.0") => {}
            Some(other) => tracing::warn!(
                version = %other,
                "Document is not Swagger 2.0; only the 2.0 subset will be read"
            ),
            None => tracing::warn!("Document does not declare a 'swagger' version"),
        }

        let doc: Doc =
            serde_json::from_value(self.json).map_err(GenerationError::SerializationError)?;
        tracing::debug!(
            title = %doc.info.title,
            paths = doc.paths.len(),
            definitions = doc.definitions.len(),
            "Parsed Swagger document"
        );
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{HttpMethod, ParameterLocation, SchemaType};
    use serde_json::json;

    fn minimal() -> JsonValue {
        json!({
            "swagger": "2.0",
            "info": { "title": "Widgets", "version": "1" },
            "paths": { "/widgets": { "get": { "responses": { "200": { "description": "ok" } } } } }
        })
    }

    #[test]
    fn test_parse_minimal_document_with_defaults() {
        let doc = OpenApiParser::new(minimal()).parse().unwrap();

        assert_eq!(doc.info.title, "Widgets");
        assert_eq!(doc.base_path, "");
        assert!(doc.definitions.is_empty());
        assert!(doc.parameters.is_empty());
        assert!(doc.security_definitions.is_empty());
        assert!(doc.security.is_none());

        let item = &doc.paths["/widgets"];
        let ops = item.operations();
        assert_eq!(ops.len(), 1);
        assert!(ops.contains_key(&HttpMethod::Get));
        assert!(ops[&HttpMethod::Get].parameters.is_empty());
    }

    #[test]
    fn test_missing_paths_is_error() {
        let mut value = minimal();
        value.as_object_mut().unwrap().remove("paths");

        let err = OpenApiParser::new(value).parse().unwrap_err();
        match err {
            GenerationError::ValidationError(msg) => assert!(msg.contains("paths")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_paths_is_error() {
        let mut value = minimal();
        value["paths"] = json!({});

        assert!(matches!(
            OpenApiParser::new(value).parse(),
            Err(GenerationError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_info_is_error() {
        let mut value = minimal();
        value.as_object_mut().unwrap().remove("info");

        let err = OpenApiParser::new(value).parse().unwrap_err();
        assert!(err.to_string().contains("info"));
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        let result = OpenApiParser::from_text("{ not json", SourceFormat::Json);
        assert!(matches!(result, Err(GenerationError::SerializationError(_))));
    }

    #[test]
    fn test_yaml_document() {
        let yaml = r#"swagger: "2.0"
info:
  title: Yaml API
paths:
  /pets/{id}:
    get:
      parameters:
        - name: id
          in: path
          required: true
          type: integer
      responses:
        "200":
          description: ok
"#;
        let doc = OpenApiParser::from_text(yaml, SourceFormat::Unknown)
            .unwrap()
            .parse()
            .unwrap();

        let op = doc.paths["/pets/{id}"].get.as_ref().unwrap();
        assert_eq!(op.parameters[0].location, ParameterLocation::Path);
        assert_eq!(op.parameters[0].schema_type, SchemaType::Integer);
        assert!(op.parameters[0].required);
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SourceFormat::detect(Some("application/json"), "x"),
            SourceFormat::Json
        );
        assert_eq!(SourceFormat::detect(None, "spec.yml"), SourceFormat::Yaml);
        assert_eq!(SourceFormat::detect(None, "spec"), SourceFormat::Unknown);
    }
}
