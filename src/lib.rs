//! swaggen - synthesizes typed client interfaces from Swagger 2.0 documents
//!
//! A document is parsed into a typed model, its definitions are registered as named
//! types, and every path × method pair becomes one method of an abstract interface.
//! Printers render that interface as JSON or as a Rust trait.
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;
