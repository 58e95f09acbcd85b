//! Infrastructure layer - concrete implementations of domain ports

pub mod catalog;
pub mod openapi;
pub mod output;
pub mod printers;

pub use catalog::ApisGuruClient;
pub use output::FileSystemOutputService;
