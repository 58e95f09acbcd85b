//! Generation domain module - turns a Swagger document into a client interface
//!
//! The pipeline runs in a fixed order: definitions are registered, the document is
//! checked for unsupported schema shapes, then every operation is synthesized into a
//! method descriptor. Printers in `infrastructure::printers` render the result.

pub mod diagnostics;
pub mod errors;
pub mod registry;
pub mod sanitizers;
pub mod security;
pub mod synthesizer;
pub mod traits;
pub mod types;
pub mod utils;
pub mod validation;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
pub use errors::*;
pub use registry::{DefinitionRegistry, TypeMapper, build_registry};
pub use synthesizer::{DEFAULT_INTERFACE_NAME, InterfaceSynthesizer};
pub use traits::*;
pub use types::*;
pub use validation::check_unsupported_schema_usage;
