use crate::application::translate::TranslatorChain;
use crate::domain::error::TranslatorError;
use crate::domain::traits::{SpeechRecognizer, SpeechSynthesizer};
use crate::infrastructure::config::Config;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::network::providers::build_providers;
use crate::infrastructure::speech::{CloudRecognizer, EspeakSynthesizer};
use std::sync::Arc;

/// Process-wide context, built once at start-up and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub chain: Arc<TranslatorChain>,
    pub tts: Option<Arc<dyn SpeechSynthesizer>>,
    pub recognizer: Option<Arc<dyn SpeechRecognizer>>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, TranslatorError> {
        let http_client = create_client()?;
        let chain = TranslatorChain::new(build_providers(&config.providers, &http_client));

        let tts = EspeakSynthesizer::probe(&config.speech)
            .await
            .map(|engine| Arc::new(engine) as Arc<dyn SpeechSynthesizer>);
        let recognizer = CloudRecognizer::from_config(http_client, &config.speech.recognizer)
            .map(|r| Arc::new(r) as Arc<dyn SpeechRecognizer>);

        Ok(Self {
            config: Arc::new(config),
            chain: Arc::new(chain),
            tts,
            recognizer,
        })
    }

    /// Assemble a state from ready-made parts.
    pub fn from_parts(
        config: Config,
        chain: TranslatorChain,
        tts: Option<Arc<dyn SpeechSynthesizer>>,
        recognizer: Option<Arc<dyn SpeechRecognizer>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            chain: Arc::new(chain),
            tts,
            recognizer,
        }
    }
}
