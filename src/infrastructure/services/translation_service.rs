//! Translation service - the public contract for translating user content
//!
//! Decides whether a text needs translating at all, answers from the
//! persistent cache when it can, and falls through to the provider gateway on
//! a miss. No operation here returns an error: every failure resolves to the
//! original text with `is_translated == false`.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::translation::{
    FALLBACK_LANGUAGE, LocaleProvider, TranslationGateway, resolve_language,
};
use crate::infrastructure::cache::{CacheStats, TranslationCache};

/// Default number of batch elements translated at once
pub const DEFAULT_BATCH_CONCURRENCY: usize = 8;

/// Configuration for the translation service
#[derive(Debug, Clone)]
pub struct TranslationServiceConfig {
    /// Upper bound on concurrent element translations within one batch
    pub batch_concurrency: usize,
    /// Resolve each distinct text in a batch once and fan the result out
    pub dedupe_batches: bool,
}

impl Default for TranslationServiceConfig {
    fn default() -> Self {
        Self {
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            dedupe_batches: false,
        }
    }
}

impl TranslationServiceConfig {
    pub fn with_batch_concurrency(mut self, batch_concurrency: usize) -> Self {
        self.batch_concurrency = batch_concurrency.max(1);
        self
    }

    pub fn with_dedupe_batches(mut self, dedupe_batches: bool) -> Self {
        self.dedupe_batches = dedupe_batches;
        self
    }
}

/// Outcome of translating one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// Translated text, or the original when no translation is available
    pub translation: String,
    pub is_translated: bool,
}

impl TranslationResult {
    pub fn translated(translation: impl Into<String>) -> Self {
        Self {
            translation: translation.into(),
            is_translated: true,
        }
    }

    pub fn untranslated(original: impl Into<String>) -> Self {
        Self {
            translation: original.into(),
            is_translated: false,
        }
    }
}

/// Outcome of translating a batch, position-aligned with the input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTranslationResult {
    pub translations: Vec<String>,
    pub is_translated: Vec<bool>,
}

impl BatchTranslationResult {
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

impl FromIterator<TranslationResult> for BatchTranslationResult {
    fn from_iter<I: IntoIterator<Item = TranslationResult>>(iter: I) -> Self {
        let (translations, is_translated) = iter
            .into_iter()
            .map(|result| (result.translation, result.is_translated))
            .unzip();

        Self {
            translations,
            is_translated,
        }
    }
}

/// Translation service over a cache, a provider gateway and a locale preference
pub struct TranslationService {
    cache: Arc<TranslationCache>,
    gateway: Arc<dyn TranslationGateway>,
    locale: Arc<dyn LocaleProvider>,
    config: TranslationServiceConfig,
}

impl std::fmt::Debug for TranslationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationService")
            .field("cache", &self.cache)
            .field("gateway", &self.gateway.provider_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TranslationService {
    pub fn new(
        cache: Arc<TranslationCache>,
        gateway: Arc<dyn TranslationGateway>,
        locale: Arc<dyn LocaleProvider>,
    ) -> Self {
        Self::with_config(cache, gateway, locale, TranslationServiceConfig::default())
    }

    pub fn with_config(
        cache: Arc<TranslationCache>,
        gateway: Arc<dyn TranslationGateway>,
        locale: Arc<dyn LocaleProvider>,
        config: TranslationServiceConfig,
    ) -> Self {
        Self {
            cache,
            gateway,
            locale,
            config,
        }
    }

    /// Translates `text` into `target_language`, or the locale preference
    ///
    /// Empty text and English targets are returned untouched without touching
    /// the cache or the network. Provider failures fall back to the original
    /// text and are not cached, so the next call tries the provider again.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn translate_text(
        &self,
        text: &str,
        target_language: Option<&str>,
    ) -> TranslationResult {
        if text.trim().is_empty() {
            return TranslationResult::untranslated(text);
        }

        let target = resolve_language(target_language, self.locale.as_ref());

        if target.eq_ignore_ascii_case(FALLBACK_LANGUAGE) {
            debug!("Target language is English, skipping translation");
            return TranslationResult::untranslated(text);
        }

        if let Some(cached) = self.cache.get(text, &target).await {
            return TranslationResult::translated(cached);
        }

        match self.gateway.translate(text, &target).await {
            Ok(translated) => {
                self.cache.set(text, &target, &translated).await;
                TranslationResult::translated(translated)
            }
            Err(_) => TranslationResult::untranslated(text),
        }
    }

    /// Translates every element of `texts`, preserving order and length
    ///
    /// Each element resolves exactly as [`Self::translate_text`] would.
    pub async fn translate_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        target_language: Option<&str>,
    ) -> BatchTranslationResult {
        if texts.is_empty() {
            return BatchTranslationResult::default();
        }

        let target = resolve_language(target_language, self.locale.as_ref());
        let concurrency = self.config.batch_concurrency.max(1);

        if !self.config.dedupe_batches {
            return stream::iter(texts.iter())
                .map(|text| self.translate_text(text.as_ref(), Some(target.as_str())))
                .buffered(concurrency)
                .collect::<Vec<_>>()
                .await
                .into_iter()
                .collect();
        }

        let mut distinct: Vec<&str> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let positions: Vec<usize> = texts
            .iter()
            .map(|text| {
                let text = text.as_ref();
                *slots.entry(text).or_insert_with(|| {
                    distinct.push(text);
                    distinct.len() - 1
                })
            })
            .collect();

        debug!(
            total = texts.len(),
            distinct = distinct.len(),
            "Translating deduplicated batch"
        );

        let resolved: Vec<TranslationResult> = stream::iter(distinct)
            .map(|text| self.translate_text(text, Some(target.as_str())))
            .buffered(concurrency)
            .collect()
            .await;

        positions
            .into_iter()
            .map(|slot| resolved[slot].clone())
            .collect()
    }

    /// Best-ranked language of `text`, or `None` when unknown
    pub async fn detect_language(&self, text: &str) -> Option<String> {
        self.gateway.detect_language(text).await
    }

    /// True only when `text` is confidently in a language other than the user's
    pub async fn needs_translation(&self, text: &str) -> bool {
        let Some(detected) = self.gateway.detect_language(text).await else {
            return false;
        };

        let current = resolve_language(None, self.locale.as_ref());
        !detected.eq_ignore_ascii_case(&current)
    }

    pub async fn clear_translation_cache(&self) {
        self.cache.clear().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
