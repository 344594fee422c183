//! Persistent, TTL-bounded translation cache
//!
//! The whole [`CacheTable`] lives as one JSON blob under a single storage key.
//! Every read loads and prunes the blob; every write rewrites it in full.
//! Writes are serialized through an async mutex so concurrent callers in one
//! process cannot drop each other's entries during read-modify-write.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::storage::KeyValueStore;
use crate::domain::translation::{CacheEntry, CacheTable, DEFAULT_CACHE_TTL_DAYS};
use crate::domain::DomainError;

/// Storage key the translation table is persisted under
pub const DEFAULT_STORAGE_KEY: &str = "@fight_station_translations";

/// Configuration for the translation cache
#[derive(Debug, Clone)]
pub struct TranslationCacheConfig {
    /// Storage key holding the serialized table
    pub storage_key: String,
    /// Age after which an entry is treated as absent
    pub ttl: Duration,
}

impl Default for TranslationCacheConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            ttl: Duration::days(DEFAULT_CACHE_TTL_DAYS),
        }
    }
}

impl TranslationCacheConfig {
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Live (unexpired) entries
    pub entries: usize,
    pub storage_key: String,
}

/// Process-wide translation cache over a [`KeyValueStore`]
#[derive(Debug)]
pub struct TranslationCache {
    store: Arc<dyn KeyValueStore>,
    config: TranslationCacheConfig,
    write_lock: Mutex<()>,
}

impl TranslationCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(store, TranslationCacheConfig::default())
    }

    pub fn with_config(store: Arc<dyn KeyValueStore>, config: TranslationCacheConfig) -> Self {
        Self {
            store,
            config,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &TranslationCacheConfig {
        &self.config
    }

    /// Loads the persisted table with expired entries removed
    ///
    /// An absent, unreadable or corrupt blob yields an empty table.
    pub async fn load(&self) -> CacheTable {
        match self.try_load().await {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "Translation cache unavailable, treating as empty");
                CacheTable::new()
            }
        }
    }

    /// Returns the cached translation of `text`, if one is recorded and fresh
    pub async fn get(&self, text: &str, target_language: &str) -> Option<String> {
        let table = self.load().await;

        match table.lookup(text, target_language) {
            Some(entry) => {
                debug!(target_language, "Translation cache hit");
                Some(entry.translated_text.clone())
            }
            None => {
                debug!(target_language, "Translation cache miss");
                None
            }
        }
    }

    /// Records `translated_text` for `text`, stamped with the current time
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn set(&self, text: &str, target_language: &str, translated_text: &str) {
        let _guard = self.write_lock.lock().await;

        let mut table = match self.try_load().await {
            Ok(table) => table,
            Err(e @ DomainError::Serialization { .. }) => {
                warn!(error = %e, "Discarding corrupt translation cache");
                CacheTable::new()
            }
            Err(e) => {
                warn!(error = %e, "Skipping translation cache write");
                return;
            }
        };

        table.insert(CacheEntry::new(text, target_language, translated_text));

        if let Err(e) = self.persist(&table).await {
            warn!(error = %e, "Failed to persist translation cache");
        }
    }

    /// Deletes the persisted table
    pub async fn clear(&self) {
        let _guard = self.write_lock.lock().await;

        match self.store.remove(&self.config.storage_key).await {
            Ok(()) => debug!("Translation cache cleared"),
            Err(e) => warn!(error = %e, "Failed to clear translation cache"),
        }
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.load().await.len(),
            storage_key: self.config.storage_key.clone(),
        }
    }

    async fn try_load(&self) -> Result<CacheTable, DomainError> {
        let Some(blob) = self.store.get(&self.config.storage_key).await? else {
            return Ok(CacheTable::new());
        };

        let mut table: CacheTable = serde_json::from_str(&blob)?;
        let pruned = table.prune_expired(Utc::now(), self.config.ttl);

        if pruned > 0 {
            debug!(pruned, "Pruned expired translations");
        }

        Ok(table)
    }

    async fn persist(&self, table: &CacheTable) -> Result<(), DomainError> {
        let blob = serde_json::to_string(table)?;
        self.store.set(&self.config.storage_key, &blob).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockKeyValueStore;
    use crate::infrastructure::storage::InMemoryKeyValueStore;
    use async_trait::async_trait;

    fn stale_blob(text: &str, lang: &str, translated: &str, age_days: i64) -> String {
        let mut table = CacheTable::new();
        table.insert(
            CacheEntry::new(text, lang, translated)
                .with_recorded_at(Utc::now() - Duration::days(age_days)),
        );
        serde_json::to_string(&table).unwrap()
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = TranslationCache::new(Arc::new(InMemoryKeyValueStore::new()));

        cache
            .set("Great session today", "de", "Tolle Sitzung heute")
            .await;

        assert_eq!(
            cache.get("Great session today", "de").await,
            Some("Tolle Sitzung heute".to_string())
        );
        assert!(cache.get("Great session today", "es").await.is_none());
    }

    #[tokio::test]
    async fn test_get_on_empty_store() {
        let cache = TranslationCache::new(Arc::new(InMemoryKeyValueStore::new()));
        assert!(cache.get("anything", "de").await.is_none());
        assert!(cache.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_collision_is_a_miss() {
        let cache = TranslationCache::new(Arc::new(InMemoryKeyValueStore::new()));
        let prefix = "Sparring at the gym was intense and everyone showed up";
        let first = format!("{} early", prefix);
        let second = format!("{} late", prefix);

        cache.set(&first, "de", "früh").await;

        assert_eq!(cache.get(&first, "de").await, Some("früh".to_string()));
        assert!(cache.get(&second, "de").await.is_none());
    }

    #[tokio::test]
    async fn test_expired_entries_are_pruned_on_load() {
        let store = Arc::new(InMemoryKeyValueStore::with_value(
            DEFAULT_STORAGE_KEY,
            stale_blob("old post", "de", "alter Beitrag", 8),
        ));
        let cache = TranslationCache::new(store);

        assert!(cache.get("old post", "de").await.is_none());
        assert_eq!(cache.stats().await.entries, 0);
    }

    #[tokio::test]
    async fn test_recent_entries_survive_load() {
        let store = Arc::new(InMemoryKeyValueStore::with_value(
            DEFAULT_STORAGE_KEY,
            stale_blob("new post", "de", "neuer Beitrag", 6),
        ));
        let cache = TranslationCache::new(store);

        assert_eq!(
            cache.get("new post", "de").await,
            Some("neuer Beitrag".to_string())
        );
    }

    #[tokio::test]
    async fn test_write_drops_expired_entries_from_blob() {
        let store = Arc::new(InMemoryKeyValueStore::with_value(
            DEFAULT_STORAGE_KEY,
            stale_blob("old post", "de", "alter Beitrag", 30),
        ));
        let cache = TranslationCache::new(store.clone());

        cache.set("new post", "de", "neuer Beitrag").await;

        let blob = store.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
        let table: CacheTable = serde_json::from_str(&blob).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.lookup("new post", "de").is_some());
    }

    #[tokio::test]
    async fn test_corrupt_blob_treated_as_empty() {
        let store = Arc::new(InMemoryKeyValueStore::with_value(
            DEFAULT_STORAGE_KEY,
            "{ this is not json",
        ));
        let cache = TranslationCache::new(store.clone());

        assert!(cache.get("hello", "de").await.is_none());

        cache.set("hello", "de", "hallo").await;
        assert_eq!(cache.get("hello", "de").await, Some("hallo".to_string()));
    }

    #[tokio::test]
    async fn test_read_failure_degrades_to_miss() {
        let store = Arc::new(MockKeyValueStore::new().with_read_error("storage offline"));
        let cache = TranslationCache::new(store.clone());

        assert!(cache.get("hello", "de").await.is_none());

        cache.set("hello", "de", "hallo").await;
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let store = Arc::new(MockKeyValueStore::new().with_write_error("read-only"));
        let cache = TranslationCache::new(store.clone());

        cache.set("hello", "de", "hallo").await;

        assert_eq!(store.write_count(), 1);
        assert!(cache.get("hello", "de").await.is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_blob() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let cache = TranslationCache::new(store.clone());

        cache.set("hello", "de", "hallo").await;
        cache.clear().await;

        assert!(store.get(DEFAULT_STORAGE_KEY).await.unwrap().is_none());
        assert!(cache.get("hello", "de").await.is_none());
    }

    #[tokio::test]
    async fn test_custom_storage_key_and_ttl() {
        let store = Arc::new(MockKeyValueStore::new());
        let config = TranslationCacheConfig::default()
            .with_storage_key("custom")
            .with_ttl(Duration::days(1));
        let cache = TranslationCache::with_config(store.clone(), config);

        cache.set("hello", "de", "hallo").await;

        assert!(store.value("custom").is_some());
        assert!(store.value(DEFAULT_STORAGE_KEY).is_none());
    }

    #[tokio::test]
    async fn test_configured_ttl_overrides_default() {
        let now = Utc::now();
        let mut table = CacheTable::new();
        table.insert(
            CacheEntry::new("two days old", "de", "zwei Tage alt")
                .with_recorded_at(now - Duration::days(2)),
        );
        table.insert(
            CacheEntry::new("half a day old", "de", "einen halben Tag alt")
                .with_recorded_at(now - Duration::hours(12)),
        );
        let store = Arc::new(InMemoryKeyValueStore::with_value(
            DEFAULT_STORAGE_KEY,
            serde_json::to_string(&table).unwrap(),
        ));
        let config = TranslationCacheConfig::default().with_ttl(Duration::days(1));
        let cache = TranslationCache::with_config(store, config);

        assert!(cache.get("two days old", "de").await.is_none());
        assert_eq!(
            cache.get("half a day old", "de").await,
            Some("einen halben Tag alt".to_string())
        );
        assert_eq!(cache.stats().await.entries, 1);
    }

    #[tokio::test]
    async fn test_oversized_ttl_keeps_entries() {
        let config = TranslationCacheConfig::default().with_ttl(Duration::days(1_000_000_000));
        let cache =
            TranslationCache::with_config(Arc::new(InMemoryKeyValueStore::new()), config);

        cache.set("hello", "de", "hallo").await;

        assert_eq!(cache.get("hello", "de").await, Some("hallo".to_string()));
    }

    /// Store that yields between every operation to force interleaving
    #[derive(Debug, Default)]
    struct YieldingStore {
        inner: InMemoryKeyValueStore,
    }

    #[async_trait]
    impl KeyValueStore for YieldingStore {
        async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
            tokio::task::yield_now().await;
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
            tokio::task::yield_now().await;
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), DomainError> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_writes_do_not_lose_entries() {
        let cache = Arc::new(TranslationCache::new(Arc::new(YieldingStore::default())));

        let writes = (0..20).map(|i| {
            let cache = cache.clone();
            async move {
                cache
                    .set(&format!("post {}", i), "de", &format!("Beitrag {}", i))
                    .await;
            }
        });
        futures::future::join_all(writes).await;

        assert_eq!(cache.stats().await.entries, 20);
        for i in 0..20 {
            assert_eq!(
                cache.get(&format!("post {}", i), "de").await,
                Some(format!("Beitrag {}", i))
            );
        }
    }
}
