use crate::domain::error::{ProviderFailure, TranslatorError};
use crate::domain::model::{ProviderKind, TranslationRequest};
use crate::domain::traits::TranslationProvider;
use crate::infrastructure::config::{GoogleCloudConfig, PROVIDER_GOOGLE_CLOUD};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use tracing::{info, warn};

/// Credential material for the Cloud Translation v2 REST API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudCredential {
    ApiKey(String),
    AccessToken(String),
}

#[derive(Deserialize)]
struct CredentialFile {
    api_key: Option<String>,
    access_token: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Resolve credentials once at start-up.
///
/// An inline API key wins over the credential file. Returns `None` (and the
/// provider stays out of the chain) when nothing usable is found.
pub fn load_credential(config: &GoogleCloudConfig) -> Option<CloudCredential> {
    if let Some(key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        return Some(CloudCredential::ApiKey(key.trim().to_string()));
    }

    let path = config.credentials_path.as_deref()?;
    match read_credential_file(path) {
        Ok(credential) => {
            info!(path, "Loaded Google Cloud credentials");
            Some(credential)
        }
        Err(e) => {
            warn!(path, error = %e, "Google Cloud not initialized, provider disabled");
            None
        }
    }
}

fn read_credential_file(path: &str) -> Result<CloudCredential, TranslatorError> {
    let content = fs::read_to_string(path)?;
    let file: CredentialFile = serde_json::from_str(&content)?;

    if let Some(key) = file.api_key.filter(|k| !k.is_empty()) {
        return Ok(CloudCredential::ApiKey(key));
    }
    if let Some(token) = file.access_token.filter(|t| !t.is_empty()) {
        return Ok(CloudCredential::AccessToken(token));
    }

    Err(TranslatorError::Config(format!(
        "credential file of type {:?} carries neither api_key nor access_token",
        file.kind.unwrap_or_default()
    )))
}

#[derive(Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize, Debug, Default)]
struct CloudResponse {
    #[serde(default)]
    data: CloudData,
    error: Option<CloudError>,
}

#[derive(Deserialize, Debug, Default)]
struct CloudData {
    #[serde(default)]
    translations: Vec<CloudTranslation>,
}

#[derive(Deserialize, Debug)]
struct CloudTranslation {
    #[serde(rename = "translatedText", default)]
    translated_text: String,
}

#[derive(Deserialize, Debug)]
struct CloudError {
    code: Option<u16>,
    message: Option<String>,
}

/// Paid Google Cloud Translation client
pub struct GoogleCloudTranslator {
    client: Client,
    endpoint: String,
    credential: CloudCredential,
    timeout: Duration,
}

impl GoogleCloudTranslator {
    pub fn new(client: Client, config: &GoogleCloudConfig, credential: CloudCredential) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            credential,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl TranslationProvider for GoogleCloudTranslator {
    fn name(&self) -> &'static str {
        PROVIDER_GOOGLE_CLOUD
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::ManagedCloudClient
    }

    async fn attempt(&self, request: &TranslationRequest) -> Result<String, ProviderFailure> {
        let body = TranslateBody {
            q: &request.source_text,
            source: request.source_lang,
            target: request.target_lang,
            format: "text",
        };

        let builder = self.client.post(&self.endpoint).json(&body).timeout(self.timeout);
        let builder = match &self.credential {
            CloudCredential::ApiKey(key) => builder.query(&[("key", key.as_str())]),
            CloudCredential::AccessToken(token) => builder.bearer_auth(token),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderFailure::transport(PROVIDER_GOOGLE_CLOUD, e))?;
        let status = response.status();
        let parsed: CloudResponse = response
            .json()
            .await
            .map_err(|e| ProviderFailure::Extraction(format!("invalid JSON: {}", e)))?;

        if let Some(err) = parsed.error {
            return Err(ProviderFailure::Rejected(format!(
                "{} {}",
                err.code.unwrap_or(status.as_u16()),
                err.message.unwrap_or_default()
            )));
        }
        if !status.is_success() {
            return Err(ProviderFailure::Rejected(format!("HTTP {}", status)));
        }

        // A missing field reads as "", which the chain then rejects.
        Ok(parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_with(api_key: Option<&str>, path: Option<&str>) -> GoogleCloudConfig {
        GoogleCloudConfig {
            api_key: api_key.map(str::to_string),
            credentials_path: path.map(str::to_string),
            ..GoogleCloudConfig::default()
        }
    }

    #[test]
    fn no_credentials_means_no_provider() {
        assert_eq!(load_credential(&config_with(None, None)), None);
        assert_eq!(load_credential(&config_with(Some("  "), None)), None);
    }

    #[test]
    fn inline_key_wins() {
        assert_eq!(
            load_credential(&config_with(Some("k1"), Some("/nonexistent.json"))),
            Some(CloudCredential::ApiKey("k1".to_string()))
        );
    }

    #[test]
    fn reads_token_from_credential_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"type": "authorized_user", "access_token": "ya29.x"}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        assert_eq!(
            load_credential(&config_with(None, Some(&path))),
            Some(CloudCredential::AccessToken("ya29.x".to_string()))
        );
    }

    #[test]
    fn unusable_credential_file_disables_provider() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"type": "service_account", "private_key": "..."}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        assert_eq!(load_credential(&config_with(None, Some(&path))), None);
        assert_eq!(
            load_credential(&config_with(None, Some("/definitely/missing.json"))),
            None
        );
    }
}
