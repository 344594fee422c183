use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub service: ServiceSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Remote translation provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Persistent cache settings
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// `file` or `memory`
    #[serde(default = "default_cache_backend")]
    pub backend: String,
    #[serde(default = "default_cache_directory")]
    pub directory: String,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_ttl_days")]
    pub ttl_days: i64,
}

/// Translation service settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    /// Locale preference used when a call names no target language
    #[serde(default)]
    pub default_language: Option<String>,
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,
    #[serde(default)]
    pub dedupe_batches: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_provider_url() -> String {
    "https://libretranslate.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_backend() -> String {
    "file".to_string()
}

fn default_cache_directory() -> String {
    ".fight_station".to_string()
}

fn default_storage_key() -> String {
    crate::infrastructure::cache::DEFAULT_STORAGE_KEY.to_string()
}

fn default_ttl_days() -> i64 {
    crate::domain::translation::DEFAULT_CACHE_TTL_DAYS
}

fn default_batch_concurrency() -> usize {
    crate::infrastructure::services::DEFAULT_BATCH_CONCURRENCY
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: default_cache_backend(),
            directory: default_cache_directory(),
            storage_key: default_storage_key(),
            ttl_days: default_ttl_days(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            default_language: None,
            batch_concurrency: default_batch_concurrency(),
            dedupe_batches: false,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
