//! Catalog client implementations

pub mod apis_guru;

pub use apis_guru::ApisGuruClient;
