use crate::domain::error::TranslatorError;
use crate::domain::model::{Language, Voice};
use crate::domain::traits::SpeechSynthesizer;
use crate::infrastructure::config::SpeechConfig;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

pub const MIN_RATE: u32 = 50;
pub const MAX_RATE: u32 = 300;

/// Substrings searched in voice metadata, most specific first
fn voice_keywords(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => &["english"],
        Language::Kannada => &["kannada", "indian", "hindi"],
    }
}

/// Pick a voice for `language`, falling back to the first available voice.
pub fn select_voice(voices: &[Voice], language: Language) -> Option<&Voice> {
    for keyword in voice_keywords(language) {
        let found = voices.iter().find(|v| {
            v.name.to_lowercase().contains(keyword) || v.id.to_lowercase().contains(keyword)
        });
        if found.is_some() {
            return found;
        }
    }
    voices.first()
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// ```text
/// Pty Language       Age/Gender VoiceName          File                 Other Languages
///  5  kn              --/M      Kannada            dra/kn
/// ```
pub fn parse_voice_list(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 5 {
                return None;
            }
            Some(Voice {
                id: fields[1].to_string(),
                name: fields[3].replace('_', " "),
                language: fields[1].to_string(),
            })
        })
        .collect()
}

/// eSpeak NG driven as a subprocess
pub struct EspeakSynthesizer {
    command: String,
    rate: u32,
    volume: f32,
    headless: bool,
    timeout: Duration,
    voices: Vec<Voice>,
}

impl EspeakSynthesizer {
    pub fn new(config: &SpeechConfig, voices: Vec<Voice>) -> Self {
        Self {
            command: config.tts_command.clone(),
            rate: config.rate.clamp(MIN_RATE, MAX_RATE),
            volume: config.volume.clamp(0.0, 1.0),
            headless: config.headless,
            timeout: Duration::from_secs(config.synth_timeout_secs),
            voices,
        }
    }

    /// Start the engine by listing its voices once.
    ///
    /// Returns `None` if the binary is missing or broken; callers then run
    /// without speech output.
    pub async fn probe(config: &SpeechConfig) -> Option<Self> {
        let output = Command::new(&config.tts_command)
            .arg("--voices")
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(out) if out.status.success() => {
                let voices = parse_voice_list(&String::from_utf8_lossy(&out.stdout));
                debug!(count = voices.len(), "TTS engine ready");
                Some(Self::new(config, voices))
            }
            Ok(out) => {
                warn!(
                    stderr = %String::from_utf8_lossy(&out.stderr),
                    "TTS Engine initialization failed"
                );
                None
            }
            Err(e) => {
                warn!(
                    command = %config.tts_command,
                    error = %e,
                    "TTS Engine initialization failed"
                );
                None
            }
        }
    }

    fn build_args(&self, language: Language) -> Vec<String> {
        let mut args = vec![
            "-s".to_string(),
            self.rate.to_string(),
            // espeak amplitude runs 0-200 with 100 as normal
            "-a".to_string(),
            ((self.volume * 100.0).round() as u32).to_string(),
        ];
        if let Some(voice) = select_voice(&self.voices, language) {
            args.push("-v".to_string());
            args.push(voice.id.clone());
        }
        args.push("--stdin".to_string());
        args
    }

    async fn run(&self, text: &str, args: Vec<String>) -> Result<(), TranslatorError> {
        let mut child = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        // Dropping the child on timeout kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                TranslatorError::Speech(format!(
                    "{} timed out after {}s",
                    self.command,
                    self.timeout.as_secs()
                ))
            })??;

        if output.status.success() {
            Ok(())
        } else {
            Err(TranslatorError::Speech(format!(
                "{} error: {}",
                self.command,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for EspeakSynthesizer {
    fn id(&self) -> &'static str {
        "espeak-ng"
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, TranslatorError> {
        Ok(self.voices.clone())
    }

    async fn speak(&self, text: &str, language: Language) -> Result<(), TranslatorError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        if self.headless {
            debug!("Headless environment, skipping speech output");
            return Ok(());
        }
        let args = self.build_args(language);
        self.run(text, args).await
    }

    async fn save_to_file(
        &self,
        text: &str,
        language: Language,
        path: &Path,
    ) -> Result<(), TranslatorError> {
        if text.trim().is_empty() {
            return Err(TranslatorError::Speech("nothing to synthesize".to_string()));
        }
        let mut args = vec!["-w".to_string(), path.to_string_lossy().to_string()];
        args.extend(self.build_args(language));
        self.run(text, args).await
    }
}
