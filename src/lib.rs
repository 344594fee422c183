//! Fight Station translation service
//!
//! Translates user-generated text (posts, comments, profile fields) through a
//! remote LibreTranslate-compatible provider, with:
//! - a persistent, 7-day TTL cache keyed by text prefix and target language
//! - silent fallback to the original text on any provider or storage failure
//! - batch translation and language detection helpers

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;
pub use infrastructure::services::{
    BatchTranslationResult, TranslationResult, TranslationService, TranslationServiceConfig,
};

use std::sync::Arc;
use std::time::Duration;

use domain::translation::MAX_CACHE_TTL_DAYS;
use domain::{DomainError, LocaleProvider};
use infrastructure::{
    cache::{TranslationCache, TranslationCacheConfig},
    storage::{StorageConfig, StorageFactory, StorageType},
    translation::{HttpClient, LibreTranslateGateway},
};
use tracing::info;

/// Builds the process-wide translation cache described by `config`
pub fn create_translation_cache(config: &AppConfig) -> Result<Arc<TranslationCache>, DomainError> {
    let backend = StorageType::from_str(&config.cache.backend).ok_or_else(|| {
        DomainError::configuration(format!(
            "Unknown cache backend: {}. Valid backends: file, memory",
            config.cache.backend
        ))
    })?;

    if config.cache.ttl_days <= 0 || config.cache.ttl_days > MAX_CACHE_TTL_DAYS {
        return Err(DomainError::validation(format!(
            "Cache TTL must be between 1 and {} days, got {}",
            MAX_CACHE_TTL_DAYS, config.cache.ttl_days
        )));
    }

    let storage_config = match backend {
        StorageType::InMemory => StorageConfig::in_memory(),
        StorageType::File => StorageConfig::file(&config.cache.directory),
    };

    info!("Translation cache backend: {:?}", backend);

    let store = StorageFactory::create(&storage_config);
    let cache_config = TranslationCacheConfig::default()
        .with_storage_key(config.cache.storage_key.clone())
        .with_ttl(chrono::Duration::days(config.cache.ttl_days));

    Ok(Arc::new(TranslationCache::with_config(store, cache_config)))
}

/// Builds a translation service wired to the configured provider
pub fn create_translation_service(
    config: &AppConfig,
    cache: Arc<TranslationCache>,
    locale: Arc<dyn LocaleProvider>,
) -> Result<TranslationService, DomainError> {
    let client = HttpClient::with_timeout(Duration::from_secs(config.provider.timeout_secs))?;

    let mut gateway = LibreTranslateGateway::with_base_url(client, &config.provider.base_url);

    if let Some(api_key) = config.provider.api_key.as_deref().filter(|k| !k.is_empty()) {
        gateway = gateway.with_api_key(api_key);
    }

    info!("Translation provider: {}", config.provider.base_url);

    let service_config = TranslationServiceConfig::default()
        .with_batch_concurrency(config.service.batch_concurrency)
        .with_dedupe_batches(config.service.dedupe_batches);

    Ok(TranslationService::with_config(
        cache,
        Arc::new(gateway),
        locale,
        service_config,
    ))
}
