//! Translation provider boundary

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

/// Shortest text, in characters, worth sending for language detection
pub const MIN_DETECTION_CHARS: usize = 10;

/// Normalized outcome of a failed provider call
///
/// Every variant means the same thing to callers: no translation is available
/// for this attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayFailure {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

/// Single point of contact with the remote translation and detection providers
///
/// Implementations make exactly one attempt per call and never panic on
/// provider misbehaviour.
#[async_trait]
pub trait TranslationGateway: Send + Sync + Debug {
    /// Translates `text` into `target_language`, auto-detecting the source
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, GatewayFailure>;

    /// Returns the provider's best-ranked language for `text`
    ///
    /// `None` when the call fails or `text` is shorter than
    /// [`MIN_DETECTION_CHARS`].
    async fn detect_language(&self, text: &str) -> Option<String>;

    fn provider_name(&self) -> &'static str;
}

/// True when `text` is long enough to be worth a detection call
///
/// Counts characters of the input as given, surrounding whitespace included.
pub fn is_detectable(text: &str) -> bool {
    text.chars().count() >= MIN_DETECTION_CHARS
}
