//! Detection of schema shapes the synthesizer does not expand
//!
//! Anonymous `type: object` schemas would need invented, possibly duplicated type names.
//! They map to the opaque type instead and are reported here so the document can be
//! normalized into `#/definitions`.

use crate::generation::diagnostics::{Diagnostic, DiagnosticSink};
use crate::generation::utils::trim_slash;
use crate::generation::{Doc, Parameter};

fn has_inline_object(parameter: &Parameter) -> bool {
    parameter
        .schema
        .as_ref()
        .is_some_and(|schema| schema.is_inline_object())
}

/// Reports every inline object schema used by a parameter or a response.
///
/// Returns the number of diagnostics emitted.
pub fn check_unsupported_schema_usage(doc: &Doc, sink: &mut dyn DiagnosticSink) -> usize {
    let mut found = 0;
    let mut report = |location: String| {
        found += 1;
        sink.report(Diagnostic::inline_object(location));
    };

    for (path, item) in &doc.paths {
        let path_pointer = format!("#/paths/{}", trim_slash(path));

        for parameter in item.parameters.iter().filter(|p| has_inline_object(p)) {
            report(format!("{path_pointer}/parameters/{}", parameter.name));
        }

        for (method, operation) in item.operations() {
            let operation_pointer = format!("{path_pointer}/operations/{method}");

            for parameter in operation.parameters.iter().filter(|p| has_inline_object(p)) {
                report(format!("{operation_pointer}/parameters/{}", parameter.name));
            }

            for (code, response) in &operation.responses {
                if response
                    .schema
                    .as_ref()
                    .is_some_and(|schema| schema.is_inline_object())
                {
                    report(format!("{operation_pointer}/responses/{code}"));
                }
            }
        }
    }

    found
}
