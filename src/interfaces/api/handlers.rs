//! Request handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, warn};

use super::error::ApiError;
use crate::domain::model::{BatchItem, ChainFailure, Language, TranslationOutcome};
use crate::state::AppState;

pub const SERVICE_NAME: &str = "English to Kannada Translator";

#[derive(Debug, Deserialize)]
pub struct TranslateBody {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub english: String,
    pub kannada: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub success: bool,
    pub translations: Vec<BatchItem>,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct SpeakBody {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "english".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpeakResponse {
    pub success: bool,
    pub message: String,
    pub text: String,
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

fn invalid_body(rejection: &JsonRejection) -> ApiError {
    warn!(error = %rejection, "Rejected request body");
    ApiError::BadRequest("Invalid JSON body".to_string())
}

/// `POST /api/translate`
pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| invalid_body(&e))?;
    let english = body.text.trim().to_string();

    if english.is_empty() {
        return Err(ApiError::BadRequest("No text provided".to_string()));
    }

    match state.chain.translate(&english).await {
        TranslationOutcome::Translated(kannada) if !kannada.is_empty() => {
            Ok(Json(TranslateResponse {
                success: true,
                english,
                kannada,
                timestamp: timestamp(),
            }))
        }
        TranslationOutcome::Translated(_) => Err(ApiError::TranslationFailed),
        TranslationOutcome::Failed(failure) => {
            if failure == ChainFailure::NoProvidersConfigured {
                error!("Translator has no providers configured");
            }
            Err(ApiError::TranslationFailed)
        }
    }
}

/// `POST /api/translate-batch`
pub async fn translate_batch(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BatchResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| invalid_body(&e))?;
    let texts = parse_texts(&body)
        .ok_or_else(|| ApiError::BadRequest("No texts provided or invalid format".to_string()))?;

    let translations = state.chain.translate_batch(&texts).await;

    Ok(Json(BatchResponse {
        success: true,
        translations,
        timestamp: timestamp(),
    }))
}

/// `texts` must be a non-empty list of strings
fn parse_texts(body: &Value) -> Option<Vec<String>> {
    let items = body.get("texts")?.as_array()?;
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// `POST /api/speak`
///
/// Synthesis runs in the background; the response only confirms receipt.
pub async fn speak(
    State(state): State<AppState>,
    payload: Result<Json<SpeakBody>, JsonRejection>,
) -> Result<Json<SpeakResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| invalid_body(&e))?;
    let text = body.text.trim().to_string();
    let language_tag = body.language.to_lowercase();

    if text.is_empty() {
        return Err(ApiError::BadRequest("No text provided".to_string()));
    }
    let language: Language = language_tag.parse().map_err(|_| {
        ApiError::BadRequest("Language must be \"english\" or \"kannada\"".to_string())
    })?;

    let message = match state.tts.clone() {
        None => "Text-to-speech not available on this server",
        Some(tts) => {
            let spoken = text.clone();
            tokio::spawn(async move {
                if let Err(e) = tts.speak(&spoken, language).await {
                    warn!(error = %e, "TTS error");
                }
            });
            "Text-to-speech initiated"
        }
    };

    Ok(Json(SpeakResponse {
        success: true,
        message: message.to_string(),
        text,
        language: language.to_string(),
    }))
}

/// `GET /api/health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: format!("{} API", SERVICE_NAME),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: timestamp(),
    })
}

/// `GET /api/info`
pub async fn info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Translator with text and speech capabilities",
        "providers": state.chain.providers(),
        "speech_output": state.tts.is_some(),
        "endpoints": {
            "translate": {
                "method": "POST",
                "path": "/api/translate",
                "params": {"text": "English text to translate"}
            },
            "translate_batch": {
                "method": "POST",
                "path": "/api/translate-batch",
                "params": {"texts": "Array of English texts"}
            },
            "speak": {
                "method": "POST",
                "path": "/api/speak",
                "params": {"text": "Text to speak", "language": "english or kannada"}
            },
            "health": {
                "method": "GET",
                "path": "/api/health"
            }
        }
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texts_must_be_non_empty_string_list() {
        assert_eq!(
            parse_texts(&json!({"texts": ["a", "b"]})),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(parse_texts(&json!({"texts": []})), None);
        assert_eq!(parse_texts(&json!({"texts": "a"})), None);
        assert_eq!(parse_texts(&json!({"texts": ["a", 1]})), None);
        assert_eq!(parse_texts(&json!({})), None);
    }
}
