//! Cache maintenance commands

use serde::Serialize;
use tracing::info;

use super::print_json;
use crate::TranslationService;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsOutput {
    entries: usize,
    storage_key: String,
}

pub async fn run_clear(service: &TranslationService) -> anyhow::Result<()> {
    service.clear_translation_cache().await;
    info!("Translation cache cleared");

    Ok(())
}

pub async fn run_stats(service: &TranslationService) -> anyhow::Result<()> {
    let stats = service.cache_stats().await;

    print_json(&StatsOutput {
        entries: stats.entries,
        storage_key: stats.storage_key,
    })
}
