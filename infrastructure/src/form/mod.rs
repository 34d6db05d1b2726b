//! Form gateway adapters.
//!
//! Both adapters share [`FormDocument`], which carries a version per
//! choice pool so that pool writes are compare-and-swap.

mod document;
mod json_file;
mod memory;

pub use document::{FormDocument, FormDocumentItem};
pub use json_file::JsonFileFormGateway;
pub use memory::InMemoryFormGateway;
