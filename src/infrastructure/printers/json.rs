//! JSON rendering of the abstract interface

use super::artifact_path;
use crate::generation::{Artifact, GeneratedInterface, GenerationError, InterfacePrinter};

/// Serializes the interface as pretty-printed JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPrinter;

impl JsonPrinter {
    pub fn new() -> Self {
        Self
    }
}

impl InterfacePrinter for JsonPrinter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn print(&self, interface: &GeneratedInterface) -> Result<Artifact, GenerationError> {
        let mut content = serde_json::to_string_pretty(interface)?;
        content.push('\n');
        Ok(Artifact {
            path: artifact_path(interface, self.extension()),
            content,
        })
    }
}
