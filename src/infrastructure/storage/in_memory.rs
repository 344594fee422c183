//! In-memory key-value storage implementation

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::DomainError;
use crate::domain::storage::KeyValueStore;

/// Thread-safe in-memory key-value store
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a single value
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();

        if let Ok(mut values) = store.values.write() {
            values.insert(key.into(), value.into());
        }

        store
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let values = self
            .values
            .read()
            .map_err(|e| DomainError::storage(format!("Lock poisoned: {}", e)))?;

        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut values = self
            .values
            .write()
            .map_err(|e| DomainError::storage(format!("Lock poisoned: {}", e)))?;

        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let mut values = self
            .values
            .write()
            .map_err(|e| DomainError::storage(format!("Lock poisoned: {}", e)))?;

        values.remove(key);
        Ok(())
    }
}
