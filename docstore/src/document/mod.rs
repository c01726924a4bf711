#[allow(clippy::module_inception)]
pub mod document;
pub mod error;
