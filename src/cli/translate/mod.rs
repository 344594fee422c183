//! Translate commands

use std::io::BufRead;

use clap::Args;

use super::print_json;
use crate::TranslationService;

/// Arguments for the translate command
#[derive(Args, Clone)]
pub struct TranslateArgs {
    /// Text to translate
    pub text: String,

    /// Target language code (defaults to the locale preference)
    #[arg(long = "to")]
    pub target_language: Option<String>,
}

/// Arguments for the batch command
#[derive(Args, Clone)]
pub struct BatchArgs {
    /// Texts to translate
    pub texts: Vec<String>,

    /// Target language code (defaults to the locale preference)
    #[arg(long = "to")]
    pub target_language: Option<String>,

    /// Read additional texts from stdin, one per line
    #[arg(long)]
    pub stdin: bool,
}

pub async fn run(service: &TranslationService, args: TranslateArgs) -> anyhow::Result<()> {
    let result = service
        .translate_text(&args.text, args.target_language.as_deref())
        .await;

    print_json(&result)
}

pub async fn run_batch(service: &TranslationService, args: BatchArgs) -> anyhow::Result<()> {
    let mut texts = args.texts;

    if args.stdin {
        for line in std::io::stdin().lock().lines() {
            texts.push(line?);
        }
    }

    let result = service
        .translate_batch(&texts, args.target_language.as_deref())
        .await;

    print_json(&result)
}
