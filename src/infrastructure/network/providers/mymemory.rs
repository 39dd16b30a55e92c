use crate::domain::error::ProviderFailure;
use crate::domain::model::{ProviderKind, TranslationRequest};
use crate::domain::traits::TranslationProvider;
use crate::infrastructure::config::{MyMemoryConfig, PROVIDER_MYMEMORY};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Free MyMemory API, no authentication needed
pub struct MyMemoryTranslator {
    client: Client,
    endpoint: String,
    email: Option<String>,
    timeout: Duration,
}

impl MyMemoryTranslator {
    pub fn new(client: Client, config: &MyMemoryConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            email: config.email.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryTranslator {
    fn name(&self) -> &'static str {
        PROVIDER_MYMEMORY
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::FreeFallbackApi
    }

    async fn attempt(&self, request: &TranslationRequest) -> Result<String, ProviderFailure> {
        let lang_pair = request.lang_pair();
        let mut params = vec![
            ("q", request.source_text.as_str()),
            ("langpair", lang_pair.as_str()),
        ];
        if let Some(email) = self.email.as_deref() {
            params.push(("de", email));
        }

        let body = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProviderFailure::transport(PROVIDER_MYMEMORY, e))?
            .text()
            .await
            .map_err(|e| ProviderFailure::transport(PROVIDER_MYMEMORY, e))?;

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderFailure::Extraction(format!("invalid JSON: {}", e)))?;

        extract_translation(&value)
    }
}

/// MyMemory reports `responseStatus` as a number on success but sometimes
/// as a string (e.g. `"403"`) on errors.
fn response_status(value: &Value) -> Option<u64> {
    match value.get("responseStatus")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn extract_translation(value: &Value) -> Result<String, ProviderFailure> {
    match response_status(value) {
        Some(200) => value
            .get("responseData")
            .and_then(|data| data.get("translatedText"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderFailure::Extraction("missing responseData.translatedText".to_string())
            }),
        status => {
            let details = value
                .get("responseDetails")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            Err(ProviderFailure::Rejected(match status {
                Some(code) => format!("MyMemory API error {}: {}", code, details),
                None => format!("MyMemory API error: {}", details),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_translated_text_on_200() {
        let body = json!({
            "responseData": {"translatedText": "ಸ್ವಾಗತ", "match": 1},
            "responseStatus": 200,
            "responseDetails": ""
        });
        assert_eq!(extract_translation(&body), Ok("ಸ್ವಾಗತ".to_string()));
    }

    #[test]
    fn string_status_codes_are_errors_with_details() {
        let body = json!({
            "responseData": {"translatedText": "Welcome"},
            "responseStatus": "403",
            "responseDetails": "INVALID LANGUAGE PAIR SPECIFIED"
        });
        assert_eq!(
            extract_translation(&body),
            Err(ProviderFailure::Rejected(
                "MyMemory API error 403: INVALID LANGUAGE PAIR SPECIFIED".to_string()
            ))
        );
    }

    #[test]
    fn missing_data_is_extraction_failure() {
        let body = json!({"responseStatus": 200});
        assert!(matches!(
            extract_translation(&body),
            Err(ProviderFailure::Extraction(_))
        ));
    }
}
