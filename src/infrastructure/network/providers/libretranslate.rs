use crate::domain::error::ProviderFailure;
use crate::domain::model::{ProviderKind, TranslationRequest};
use crate::domain::traits::TranslationProvider;
use crate::infrastructure::config::{LibreTranslateConfig, PROVIDER_LIBRETRANSLATE};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

/// Community translation service speaking the LibreTranslate protocol.
pub struct LibreTranslator {
    client: Client,
    url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl LibreTranslator {
    /// `None` when no service URL is configured in the environment.
    pub fn from_config(client: Client, config: &LibreTranslateConfig) -> Option<Self> {
        let base = config.url.as_deref()?.trim().trim_end_matches('/');
        if base.is_empty() {
            return None;
        }
        Some(Self {
            client,
            url: format!("{}/translate", base),
            api_key: config.api_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslator {
    fn name(&self) -> &'static str {
        PROVIDER_LIBRETRANSLATE
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::ThirdPartyLibraryClient
    }

    async fn attempt(&self, request: &TranslationRequest) -> Result<String, ProviderFailure> {
        let body = LibreRequest {
            q: &request.source_text,
            source: request.source_lang,
            target: request.target_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderFailure::transport(PROVIDER_LIBRETRANSLATE, e))?;
        let status = response.status();
        let parsed: LibreResponse = response
            .json()
            .await
            .map_err(|e| ProviderFailure::Extraction(format!("invalid JSON: {}", e)))?;

        if let Some(error) = parsed.error {
            return Err(ProviderFailure::Rejected(error));
        }
        if !status.is_success() {
            return Err(ProviderFailure::Rejected(format!("HTTP {}", status)));
        }

        parsed
            .translated_text
            .ok_or_else(|| ProviderFailure::Extraction("missing translatedText".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_without_url() {
        let client = Client::new();
        assert!(LibreTranslator::from_config(client.clone(), &LibreTranslateConfig::default())
            .is_none());

        let blank = LibreTranslateConfig {
            url: Some(" ".to_string()),
            ..LibreTranslateConfig::default()
        };
        assert!(LibreTranslator::from_config(client, &blank).is_none());
    }

    #[test]
    fn builds_translate_url() {
        let config = LibreTranslateConfig {
            url: Some("http://localhost:5001/".to_string()),
            ..LibreTranslateConfig::default()
        };
        let provider = LibreTranslator::from_config(Client::new(), &config).unwrap();
        assert_eq!(provider.url, "http://localhost:5001/translate");
    }
}
