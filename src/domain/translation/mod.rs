//! Translation domain - cached entries, key policy and provider seams

mod entity;
mod gateway;
mod key;
mod locale;

pub use entity::{CacheEntry, CacheTable, DEFAULT_CACHE_TTL_DAYS, MAX_CACHE_TTL_DAYS};
pub use gateway::{GatewayFailure, MIN_DETECTION_CHARS, TranslationGateway, is_detectable};
pub use key::{KEY_PREFIX_CHARS, PrefixKeyGenerator, derive_key};
pub use locale::{FALLBACK_LANGUAGE, LocaleProvider, resolve_language};

#[cfg(test)]
pub use gateway::mock::MockTranslationGateway;
#[cfg(test)]
pub use locale::MockLocaleProvider;
