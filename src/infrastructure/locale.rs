//! Locale preference providers

use std::sync::{Arc, RwLock};

use crate::domain::translation::LocaleProvider;

/// Locale preference that can be changed at runtime and shared between owners
///
/// Clones observe the same preference.
#[derive(Debug, Clone, Default)]
pub struct SharedLocale {
    language: Arc<RwLock<Option<String>>>,
}

impl SharedLocale {
    pub fn new(language: Option<String>) -> Self {
        Self {
            language: Arc::new(RwLock::new(normalize(language))),
        }
    }

    /// Replaces the current preference
    pub fn set_language(&self, language: Option<String>) {
        if let Ok(mut current) = self.language.write() {
            *current = normalize(language);
        }
    }
}

impl LocaleProvider for SharedLocale {
    fn current_language(&self) -> Option<String> {
        self.language.read().ok().and_then(|lang| lang.clone())
    }
}

fn normalize(language: Option<String>) -> Option<String> {
    language
        .map(|lang| lang.trim().to_lowercase())
        .filter(|lang| !lang.is_empty())
}
