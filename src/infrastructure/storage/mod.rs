//! Storage infrastructure - Key-value storage implementations

mod factory;
mod file;
mod in_memory;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;
