use crate::domain::error::{ProviderFailure, TranslatorError};
use crate::domain::model::{Language, ProviderKind, TranslationRequest, Voice};
use async_trait::async_trait;
use std::path::Path;

/// A single translation backend in the fallback chain.
///
/// `attempt` returns the raw extracted text. Deciding whether that text is
/// acceptable (non-empty, not an echo of the input) is the chain's job, so
/// implementations only report transport, extraction and provider errors.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Stable identifier, also used in `providers.order`
    fn name(&self) -> &'static str;

    fn kind(&self) -> ProviderKind;

    async fn attempt(&self, request: &TranslationRequest) -> Result<String, ProviderFailure>;
}

/// Platform text-to-speech engine
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns the unique ID of the backend (e.g., "espeak-ng")
    fn id(&self) -> &'static str;

    async fn list_voices(&self) -> Result<Vec<Voice>, TranslatorError>;

    /// Speak `text` aloud with a voice matching `language`.
    async fn speak(&self, text: &str, language: Language) -> Result<(), TranslatorError>;

    /// Render speech to a WAV file instead of the speakers
    async fn save_to_file(
        &self,
        text: &str,
        language: Language,
        path: &Path,
    ) -> Result<(), TranslatorError>;
}

/// Speech-to-text collaborator.
///
/// Both calls yield `None` when nothing usable was recognized; the reason is
/// only visible in logs.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize_microphone(&self) -> Option<String>;

    async fn recognize_file(&self, path: &Path) -> Option<String>;
}
