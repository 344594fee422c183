//! Infrastructure services

mod translation_service;

pub use translation_service::{
    BatchTranslationResult, DEFAULT_BATCH_CONCURRENCY, TranslationResult, TranslationService,
    TranslationServiceConfig,
};
