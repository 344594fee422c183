//! Storage domain - Persistent key-value abstraction

mod repository;

pub use repository::KeyValueStore;

#[cfg(test)]
pub use repository::mock;
