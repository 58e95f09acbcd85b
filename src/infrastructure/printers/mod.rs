//! Printers rendering a `GeneratedInterface` into source text

pub mod json;
pub mod rust;

pub use json::JsonPrinter;
pub use rust::RustTraitPrinter;

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::OutputFormat;
use crate::generation::utils::to_snake_case;
use crate::generation::{GeneratedInterface, InterfacePrinter};

/// Relative artifact path: `<namespace>/<interface>.<ext>`
pub fn artifact_path(interface: &GeneratedInterface, extension: &str) -> PathBuf {
    let mut path: PathBuf = interface.name.namespace.iter().collect();
    path.push(format!("{}.{extension}", to_snake_case(&interface.name.name)));
    path
}

/// Printer for the configured output format
pub fn printer_for(format: OutputFormat) -> Arc<dyn InterfacePrinter> {
    match format {
        OutputFormat::Json => Arc::new(JsonPrinter::new()),
        OutputFormat::Rust => Arc::new(RustTraitPrinter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::QualifiedName;

    fn interface() -> GeneratedInterface {
        GeneratedInterface {
            name: QualifiedName::new(vec!["petstore".to_string()], "Api"),
            title: "Petstore".to_string(),
            base_path: String::new(),
            default_security: None,
            consumes: vec![],
            produces: vec![],
            named_types: vec![],
            methods: vec![],
            capabilities: vec![],
        }
    }

    #[test]
    fn test_artifact_path() {
        assert_eq!(
            artifact_path(&interface(), "json"),
            PathBuf::from("petstore").join("api.json")
        );
    }

    #[test]
    fn test_printer_for_format() {
        assert_eq!(printer_for(OutputFormat::Json).extension(), "json");
        assert_eq!(printer_for(OutputFormat::Rust).extension(), "rs");
    }
}
