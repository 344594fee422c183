//! Cache infrastructure - Persistent translation cache

mod translation_cache;

pub use translation_cache::{
    CacheStats, DEFAULT_STORAGE_KEY, TranslationCache, TranslationCacheConfig,
};
