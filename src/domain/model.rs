use crate::domain::error::ProviderFailure;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SOURCE_LANG: &str = "en";
pub const TARGET_LANG: &str = "kn";

/// One translation job. Languages are fixed to English -> Kannada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_text: String,
    pub source_lang: &'static str,
    pub target_lang: &'static str,
}

impl TranslationRequest {
    pub fn new(source_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            source_lang: SOURCE_LANG,
            target_lang: TARGET_LANG,
        }
    }

    /// `en|kn`, the pair notation used by MyMemory
    pub fn lang_pair(&self) -> String {
        format!("{}|{}", self.source_lang, self.target_lang)
    }
}

/// Whole-chain failure, the only error a caller of the chain ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainFailure {
    NoProvidersConfigured,
    AllProvidersExhausted,
}

impl fmt::Display for ChainFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoProvidersConfigured => write!(f, "no translation providers configured"),
            Self::AllProvidersExhausted => write!(f, "all translation providers failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(String),
    Failed(ChainFailure),
}

impl TranslationOutcome {
    /// Collapse into the caller-facing shape: text, or `None` on failure.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Translated(text) => Some(text),
            Self::Failed(_) => None,
        }
    }
}

/// What sort of backend a provider talks to, shown in status output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    UnofficialWebEndpoint,
    ManagedCloudClient,
    ThirdPartyLibraryClient,
    FreeFallbackApi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnofficialWebEndpoint => "unofficial web endpoint",
            Self::ManagedCloudClient => "managed cloud client",
            Self::ThirdPartyLibraryClient => "third-party service",
            Self::FreeFallbackApi => "free fallback API",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and kind of one configured provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub name: &'static str,
    pub kind: ProviderKind,
}

/// Diagnostic record of one provider call made by the chain.
#[derive(Debug, Clone)]
pub struct ProviderAttempt {
    pub provider: &'static str,
    pub failure: Option<ProviderFailure>,
}

/// Outcome plus the trail of attempts that led to it.
#[derive(Debug, Clone)]
pub struct TranslationReport {
    pub outcome: TranslationOutcome,
    pub attempts: Vec<ProviderAttempt>,
}

/// One row of a batch translation; `kannada` is `None` when that text failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub english: String,
    pub kannada: Option<String>,
}

/// Language tag accepted by the speech collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Kannada,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Kannada => "kannada",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" => Ok(Self::English),
            "kannada" => Ok(Self::Kannada),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

/// A text-to-speech voice as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_has_fixed_languages() {
        let req = TranslationRequest::new("Hello");
        assert_eq!(req.source_lang, "en");
        assert_eq!(req.target_lang, "kn");
        assert_eq!(req.lang_pair(), "en|kn");
    }

    #[test]
    fn language_parses_case_insensitively() {
        assert_eq!("English".parse::<Language>(), Ok(Language::English));
        assert_eq!(" KANNADA ".parse::<Language>(), Ok(Language::Kannada));
        assert!("hindi".parse::<Language>().is_err());
    }

    #[test]
    fn failed_outcome_has_no_text() {
        let failed = TranslationOutcome::Failed(ChainFailure::AllProvidersExhausted);
        assert_eq!(failed.into_text(), None);

        let empty = TranslationOutcome::Translated(String::new());
        assert_eq!(empty.into_text(), Some(String::new()));
    }

    #[test]
    fn provider_info_serializes_kind_in_snake_case() {
        let info = ProviderInfo {
            name: "mymemory",
            kind: ProviderKind::FreeFallbackApi,
        };
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            serde_json::json!({"name": "mymemory", "kind": "free_fallback_api"})
        );
        assert_eq!(ProviderKind::ManagedCloudClient.to_string(), "managed cloud client");
    }
}
