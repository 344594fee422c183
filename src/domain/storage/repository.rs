//! Key-value storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Persistent string key-value storage
///
/// Values are opaque strings; callers own their serialization. Implementations
/// must treat a missing key as `Ok(None)`, never as an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    /// Reads the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Writes `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Removes `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}
