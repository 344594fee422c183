//! Cached translation entities

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::key::derive_key;

/// Default lifetime of a cached translation
pub const DEFAULT_CACHE_TTL_DAYS: i64 = 7;

/// Longest configurable lifetime of a cached translation
pub const MAX_CACHE_TTL_DAYS: i64 = 3650;

/// One previously resolved translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Exact text submitted for translation
    pub source_text: String,
    pub target_language: String,
    pub translated_text: String,
    pub recorded_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(
        source_text: impl Into<String>,
        target_language: impl Into<String>,
        translated_text: impl Into<String>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            target_language: target_language.into(),
            translated_text: translated_text.into(),
            recorded_at: Utc::now(),
        }
    }

    /// Overrides the recording timestamp
    pub fn with_recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = recorded_at;
        self
    }

    /// A TTL reaching past the earliest representable time never expires
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.checked_sub_signed(ttl)
            .is_some_and(|cutoff| self.recorded_at < cutoff)
    }

    /// True when this entry was recorded for exactly `text`
    pub fn matches(&self, text: &str) -> bool {
        self.source_text == text
    }
}

/// All cached translations, keyed by derived cache key
///
/// Persisted as a single JSON object; every write replaces the whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheTable {
    entries: HashMap<String, CacheEntry>,
}

impl CacheTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &CacheEntry)> {
        self.entries.iter()
    }

    /// Removes every entry older than `ttl`, returning how many were dropped
    pub fn prune_expired(&mut self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now, ttl));
        before - self.entries.len()
    }

    /// Finds the entry for `(text, target_language)`
    ///
    /// A key collision with a different source text is a miss.
    pub fn lookup(&self, text: &str, target_language: &str) -> Option<&CacheEntry> {
        let key = derive_key(text, target_language);

        self.entries.get(&key).filter(|entry| entry.matches(text))
    }

    /// Inserts `entry` at its derived key, replacing whatever was there
    pub fn insert(&mut self, entry: CacheEntry) -> Option<CacheEntry> {
        let key = derive_key(&entry.source_text, &entry.target_language);
        self.entries.insert(key, entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ttl() -> Duration {
        Duration::days(DEFAULT_CACHE_TTL_DAYS)
    }

    #[test]
    fn test_lookup_hit() {
        let mut table = CacheTable::new();
        table.insert(CacheEntry::new("Great session today", "de", "Tolle Sitzung heute"));

        let entry = table.lookup("Great session today", "de").unwrap();
        assert_eq!(entry.translated_text, "Tolle Sitzung heute");
        assert!(table.lookup("Great session today", "fr").is_none());
    }

    #[test]
    fn test_lookup_rejects_key_collision() {
        let prefix = "p".repeat(60);
        let first = format!("{} one", prefix);
        let second = format!("{} two", prefix);

        let mut table = CacheTable::new();
        table.insert(CacheEntry::new(first.clone(), "de", "eins"));

        assert!(table.lookup(&first, "de").is_some());
        assert!(table.lookup(&second, "de").is_none());
    }

    #[test]
    fn test_insert_overwrites_same_key() {
        let mut table = CacheTable::new();
        table.insert(CacheEntry::new("hi", "es", "hola"));
        let previous = table.insert(CacheEntry::new("hi", "es", "buenas"));

        assert_eq!(previous.unwrap().translated_text, "hola");
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("hi", "es").unwrap().translated_text, "buenas");
    }

    #[test]
    fn test_prune_expired() {
        let now = Utc::now();
        let mut table = CacheTable::new();
        table.insert(CacheEntry::new("fresh", "de", "frisch"));
        table.insert(
            CacheEntry::new("stale", "de", "alt").with_recorded_at(now - Duration::days(8)),
        );

        let removed = table.prune_expired(now, ttl());

        assert_eq!(removed, 1);
        assert!(table.lookup("fresh", "de").is_some());
        assert!(table.lookup("stale", "de").is_none());
    }

    #[test]
    fn test_entry_at_ttl_boundary_is_kept() {
        let now = Utc::now();
        let entry = CacheEntry::new("edge", "de", "Rand").with_recorded_at(now - ttl());

        assert!(!entry.is_expired(now, ttl()));
    }

    #[test]
    fn test_oversized_ttl_never_expires() {
        let now = Utc::now();
        let entry = CacheEntry::new("hi", "es", "hola").with_recorded_at(now - Duration::days(30));
        let mut table = CacheTable::new();
        table.insert(entry.clone());

        assert!(!entry.is_expired(now, Duration::days(1_000_000_000)));
        assert_eq!(table.prune_expired(now, Duration::days(1_000_000_000)), 0);
    }

    #[test]
    fn test_serialized_layout() {
        let mut table = CacheTable::new();
        table.insert(CacheEntry::new("hi", "es", "hola"));

        let json: serde_json::Value = serde_json::to_value(&table).unwrap();
        let entry = &json["es_hi"];

        assert_eq!(entry["sourceText"], "hi");
        assert_eq!(entry["targetLanguage"], "es");
        assert_eq!(entry["translatedText"], "hola");
        assert!(entry["recordedAt"].is_string());
    }
}
