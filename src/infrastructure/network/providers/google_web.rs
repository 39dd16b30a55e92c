use crate::domain::error::ProviderFailure;
use crate::domain::model::{ProviderKind, TranslationRequest};
use crate::domain::traits::TranslationProvider;
use crate::infrastructure::config::{GoogleWebConfig, PROVIDER_GOOGLE_WEB};
use crate::infrastructure::network::http::BROWSER_USER_AGENT;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// The keyless `translate_a/single` endpoint used by browser extensions.
pub struct GoogleWebTranslator {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl GoogleWebTranslator {
    pub fn new(client: Client, config: &GoogleWebConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl TranslationProvider for GoogleWebTranslator {
    fn name(&self) -> &'static str {
        PROVIDER_GOOGLE_WEB
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::UnofficialWebEndpoint
    }

    async fn attempt(&self, request: &TranslationRequest) -> Result<String, ProviderFailure> {
        let params = [
            ("client", "gtx"),
            ("sl", request.source_lang),
            ("tl", request.target_lang),
            ("dt", "t"),
            ("q", request.source_text.as_str()),
        ];

        let body = self
            .client
            .get(&self.endpoint)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderFailure::transport(PROVIDER_GOOGLE_WEB, e))?
            .text()
            .await
            .map_err(|e| ProviderFailure::transport(PROVIDER_GOOGLE_WEB, e))?;

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderFailure::Extraction(format!("invalid JSON: {}", e)))?;

        extract_translation(&value).map(str::to_string)
    }
}

/// Pull `body[0][0][0]` out of the nested list response.
///
/// Anything that is not a list at each of the three levels, or a string at
/// the leaf, is an extraction failure.
pub fn extract_translation(value: &Value) -> Result<&str, ProviderFailure> {
    let segment = value
        .as_array()
        .and_then(|top| top.first())
        .and_then(Value::as_array)
        .and_then(|segments| segments.first())
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderFailure::Extraction("expected nested list response".to_string()))?;

    segment
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ProviderFailure::Extraction("translated segment is not a string".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_first_segment() {
        let body = json!([
            [["ನಮಸ್ಕಾರ, ಹೇಗಿದ್ದೀರಿ?", "Hello, how are you?", null, null, 1]],
            null,
            "en"
        ]);
        assert_eq!(extract_translation(&body), Ok("ನಮಸ್ಕಾರ, ಹೇಗಿದ್ದೀರಿ?"));
    }

    #[test]
    fn rejects_malformed_shapes() {
        let cases = [
            json!({"error": "blocked"}),
            json!([]),
            json!([[]]),
            json!([[[]]]),
            json!([["flat", "list"]]),
            json!([[[42, "Hello"]]]),
            json!("ನಮಸ್ಕಾರ"),
            json!(null),
        ];
        for case in cases {
            assert!(
                matches!(extract_translation(&case), Err(ProviderFailure::Extraction(_))),
                "accepted {}",
                case
            );
        }
    }
}
