//! Swagger document model and loading implementations

pub mod composite_loader;
pub mod file_loader;
pub mod http_loader;
pub mod parser;
pub mod types;

pub use composite_loader::CompositeSpecLoader;
pub use file_loader::FileSpecLoader;
pub use http_loader::HttpSpecLoader;
pub use parser::{OpenApiParser, SourceFormat};
pub use types::*;
