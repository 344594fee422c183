//! CLI module for the Fight Station translator
//!
//! Subcommands map one-to-one onto the translation service operations:
//! - `translate` / `batch`: translate one or many texts
//! - `detect` / `needs`: language detection probes
//! - `clear-cache` / `stats`: cache maintenance

pub mod cache;
pub mod detect;
pub mod translate;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::AppConfig;
use crate::infrastructure::locale::SharedLocale;
use crate::infrastructure::logging;
use crate::TranslationService;

/// Fight Station translator - cached translation of user-generated text
#[derive(Parser)]
#[command(name = "fight-station-translator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Locale preference used when no target language is given (overrides config)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate a single text
    Translate(translate::TranslateArgs),

    /// Translate several texts, preserving order
    Batch(translate::BatchArgs),

    /// Detect the language of a text
    Detect(detect::DetectArgs),

    /// Report whether a text is in a language other than the locale preference
    Needs(detect::DetectArgs),

    /// Delete every cached translation
    ClearCache,

    /// Show cache statistics
    Stats,
}

/// Loads configuration, initializes logging and wires the service
pub fn bootstrap(locale_override: Option<String>) -> anyhow::Result<TranslationService> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let locale = SharedLocale::new(locale_override.or(config.service.default_language.clone()));
    let cache = crate::create_translation_cache(&config)?;
    let service = crate::create_translation_service(&config, cache, Arc::new(locale))?;

    Ok(service)
}

/// Writes `value` to stdout as pretty JSON
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
