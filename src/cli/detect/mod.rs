//! Language detection commands

use clap::Args;
use serde::Serialize;

use super::print_json;
use crate::TranslationService;

/// Arguments for the detect and needs commands
#[derive(Args, Clone)]
pub struct DetectArgs {
    /// Text to inspect
    pub text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectOutput {
    language: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NeedsOutput {
    needs_translation: bool,
}

pub async fn run(service: &TranslationService, args: DetectArgs) -> anyhow::Result<()> {
    let language = service.detect_language(&args.text).await;

    print_json(&DetectOutput { language })
}

pub async fn run_needs(service: &TranslationService, args: DetectArgs) -> anyhow::Result<()> {
    let needs_translation = service.needs_translation(&args.text).await;

    print_json(&NeedsOutput { needs_translation })
}
