use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http_client::HttpClientTrait;
use crate::domain::translation::{GatewayFailure, TranslationGateway, is_detectable};

const DEFAULT_LIBRETRANSLATE_BASE_URL: &str = "https://libretranslate.com";

/// LibreTranslate-compatible translation and detection provider
#[derive(Debug)]
pub struct LibreTranslateGateway<C: HttpClientTrait> {
    client: C,
    api_key: Option<String>,
    base_url: String,
}

impl<C: HttpClientTrait> LibreTranslateGateway<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_LIBRETRANSLATE_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            api_key: None,
            base_url,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn translate_url(&self) -> String {
        format!("{}/translate", self.base_url)
    }

    fn detect_url(&self) -> String {
        format!("{}/detect", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![("Content-Type", "application/json")]
    }

    fn build_translate_request(&self, text: &str, target_language: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "q": text,
            "source": "auto",
            "target": target_language,
            "format": "text"
        });

        if let Some(ref api_key) = self.api_key {
            body["api_key"] = serde_json::json!(api_key);
        }

        body
    }

    fn build_detect_request(&self, text: &str) -> serde_json::Value {
        let mut body = serde_json::json!({ "q": text });

        if let Some(ref api_key) = self.api_key {
            body["api_key"] = serde_json::json!(api_key);
        }

        body
    }

    fn parse_translation(&self, json: serde_json::Value) -> Result<String, GatewayFailure> {
        let response: TranslateResponse = serde_json::from_value(json)
            .map_err(|e| GatewayFailure::Malformed(format!("Failed to parse response: {}", e)))?;

        Ok(response.translated_text)
    }

    fn parse_detection(&self, json: serde_json::Value) -> Result<Option<String>, GatewayFailure> {
        let candidates: Vec<DetectCandidate> = serde_json::from_value(json)
            .map_err(|e| GatewayFailure::Malformed(format!("Failed to parse response: {}", e)))?;

        let top = candidates.into_iter().next();

        if let Some(ref candidate) = top {
            debug!(
                language = %candidate.language,
                confidence = candidate.confidence,
                "Detected language"
            );
        }

        Ok(top.map(|c| c.language))
    }
}

#[async_trait]
impl<C: HttpClientTrait> TranslationGateway for LibreTranslateGateway<C> {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, GatewayFailure> {
        let body = self.build_translate_request(text, target_language);

        let result = match self
            .client
            .post_json(&self.translate_url(), self.headers(), &body)
            .await
        {
            Ok(json) => self.parse_translation(json),
            Err(failure) => Err(failure),
        };

        if let Err(ref failure) = result {
            warn!(
                provider = self.provider_name(),
                target_language,
                error = %failure,
                "Translation request failed"
            );
        }

        result
    }

    async fn detect_language(&self, text: &str) -> Option<String> {
        if !is_detectable(text) {
            debug!("Text too short for language detection");
            return None;
        }

        let body = self.build_detect_request(text);

        let result = match self
            .client
            .post_json(&self.detect_url(), self.headers(), &body)
            .await
        {
            Ok(json) => self.parse_detection(json),
            Err(failure) => Err(failure),
        };

        match result {
            Ok(language) => language,
            Err(failure) => {
                warn!(
                    provider = self.provider_name(),
                    error = %failure,
                    "Language detection failed"
                );
                None
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "libretranslate"
    }
}

// LibreTranslate API types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct DetectCandidate {
    language: String,
    #[serde(default)]
    confidence: f64,
}
