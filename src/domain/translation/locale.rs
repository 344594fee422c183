//! Locale preference seam

#[cfg(test)]
use mockall::automock;

/// Language assumed when no preference is available
pub const FALLBACK_LANGUAGE: &str = "en";

/// Source of the user's current two-letter language preference
#[cfg_attr(test, automock)]
pub trait LocaleProvider: Send + Sync {
    /// Current preferred language code, if one is set
    fn current_language(&self) -> Option<String>;
}

/// Picks the explicit language, else the preference, else [`FALLBACK_LANGUAGE`]
///
/// Explicit codes are trimmed and lowercased so `DE` and `de` share a cache bucket.
pub fn resolve_language(explicit: Option<&str>, locale: &dyn LocaleProvider) -> String {
    explicit
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(str::to_lowercase)
        .or_else(|| locale.current_language())
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}
