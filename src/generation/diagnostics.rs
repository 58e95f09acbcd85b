//! Advisory diagnostics emitted while synthesizing an interface
//!
//! Diagnostics never abort generation. They are pushed into a caller-provided sink so
//! tests can collect them and the CLI can route them to the log.

use serde::Serialize;
use std::fmt;

/// Category of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Anonymous `type: object` schema where a definition reference was expected
    InlineObjectSchema,
    /// Parameter `in` value other than query, path, header or body
    UnsupportedParameterLocation,
    /// Security requirement naming a scheme missing from `securityDefinitions`
    UnknownSecurityScheme,
    /// Response `$ref` that does not resolve against `responses`
    UnresolvedResponse,
    /// Two operations derive the same method name
    DuplicateMethodName,
}

/// A warning anchored at a pointer-like location in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// e.g. `#/paths/widgets/operations/GET/responses/200`
    pub location: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: location.into(),
            message: message.into(),
        }
    }

    /// Inline object schema found at `location`
    pub fn inline_object(location: impl Into<String>) -> Self {
        let location = location.into();
        let message = format!(
            "Unsupported type at {location} (types should be declared in #/definitions/{{ref}} \
             so the 'ref' is used as type name; normalize the schema using definitions)"
        );
        Self::new(DiagnosticKind::InlineObjectSchema, location, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Receives diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to `tracing` as warnings
#[derive(Debug, Default)]
pub struct TracingSink {
    reported: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of diagnostics forwarded so far
    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.reported += 1;
        tracing::warn!(
            kind = ?diagnostic.kind,
            location = %diagnostic.location,
            "{}",
            diagnostic.message
        );
    }
}
