//! Object storage: binary assets and metadata documents addressed by key.

pub mod contract;
pub mod fs;
pub mod memory;

pub use contract::{content_type_for, join_public_url, strip_public_url, ObjectStore};
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
