use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Audio file error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech error: {0}")]
    Speech(String),
}

/// Why a single provider attempt did not produce an acceptable translation.
///
/// These never cross the chain boundary; the chain logs them and moves on
/// to the next provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure {
    #[error("transport error on {provider}: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    #[error("unexpected response shape: {0}")]
    Extraction(String),

    #[error("provider rejected the request: {0}")]
    Rejected(String),

    #[error("provider returned an empty translation")]
    Empty,

    #[error("provider echoed the input unchanged")]
    EchoedInput,
}

impl ProviderFailure {
    pub fn transport(provider: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            provider,
            message: err.to_string(),
        }
    }
}
