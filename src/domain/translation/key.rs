//! Cache key derivation for translation lookups

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of leading characters of the source text folded into a key
pub const KEY_PREFIX_CHARS: usize = 50;

const WHITESPACE_DELIMITER: &str = "_";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Prefix-based cache key generator
///
/// Keys are `"{language}_{prefix}"` where `prefix` is the first
/// [`KEY_PREFIX_CHARS`] characters of the text with every whitespace run
/// replaced by a single `_`. The key is a bucket, not an identity: two texts
/// sharing a prefix map to the same key, so lookups must compare the stored
/// source text before accepting a hit.
#[derive(Debug, Clone)]
pub struct PrefixKeyGenerator {
    prefix_chars: usize,
}

impl Default for PrefixKeyGenerator {
    fn default() -> Self {
        Self {
            prefix_chars: KEY_PREFIX_CHARS,
        }
    }
}

impl PrefixKeyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the prefix length
    pub fn with_prefix_chars(mut self, prefix_chars: usize) -> Self {
        self.prefix_chars = prefix_chars;
        self
    }

    pub fn generate(&self, text: &str, target_language: &str) -> String {
        let prefix: String = text.chars().take(self.prefix_chars).collect();
        let collapsed = WHITESPACE_RUN.replace_all(&prefix, WHITESPACE_DELIMITER);

        format!("{}_{}", target_language, collapsed)
    }
}

/// Derives the cache key for `text` translated into `target_language`
pub fn derive_key(text: &str, target_language: &str) -> String {
    PrefixKeyGenerator::default().generate(text, target_language)
}
