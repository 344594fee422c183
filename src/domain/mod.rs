//! Domain layer - Core translation entities and seams

pub mod error;
pub mod storage;
pub mod translation;

pub use error::DomainError;
pub use storage::KeyValueStore;
pub use translation::{
    CacheEntry, CacheTable, GatewayFailure, LocaleProvider, TranslationGateway, derive_key,
};
