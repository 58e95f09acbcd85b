//! Process-level concerns shared by the library and the binary

pub mod config;
pub mod error;

pub use config::{Config, OutputFormat};
pub use error::Error;
