//! Property store adapters.

mod json_file;
mod memory;

pub use json_file::JsonFilePropertyStore;
pub use memory::InMemoryPropertyStore;
