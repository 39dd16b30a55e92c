use crate::domain::error::TranslatorError;
use crate::domain::traits::SpeechRecognizer;
use crate::infrastructure::config::RecognizerConfig;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};
use uuid::Uuid;

const RECORD_SAMPLE_RATE: u32 = 16_000;

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("could not understand the audio")]
    Unintelligible,

    #[error("speech recognition request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("speech service error: {0}")]
    Rejected(String),

    #[error("audio error: {0}")]
    Audio(String),
}

impl From<TranslatorError> for RecognitionError {
    fn from(err: TranslatorError) -> Self {
        Self::Audio(err.to_string())
    }
}

/// 16-bit mono PCM ready to send as LINEAR16
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linear16 {
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

impl Linear16 {
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }
}

fn scale_to_i16(sample: i32, bits: u16) -> i16 {
    if bits > 16 {
        (sample >> (bits - 16)) as i16
    } else {
        (sample << (16 - bits)) as i16
    }
}

fn downmix(samples: &[i16], channels: usize) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| i32::from(s)).sum();
            (sum / frame.len() as i32) as i16
        })
        .collect()
}

/// Read a WAV file into mono 16-bit samples.
pub fn load_linear16(path: &Path) -> Result<Linear16, TranslatorError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let interleaved: Vec<i16> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16))
            .collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => reader
            .samples::<i32>()
            .map(|s| s.map(|v| scale_to_i16(v, spec.bits_per_sample)))
            .collect::<Result<_, _>>()?,
    };

    if interleaved.is_empty() {
        return Err(TranslatorError::Speech("audio file contains no samples".to_string()));
    }

    Ok(Linear16 {
        sample_rate: spec.sample_rate,
        samples: downmix(&interleaved, usize::from(spec.channels.max(1))),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'a str,
    sample_rate_hertz: u32,
    language_code: &'a str,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Serialize)]
struct RecognizeBody<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Deserialize, Debug, Default)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
    error: Option<ServiceError>,
}

#[derive(Deserialize, Debug)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Deserialize, Debug)]
struct Alternative {
    #[serde(default)]
    transcript: String,
}

#[derive(Deserialize, Debug)]
struct ServiceError {
    message: Option<String>,
}

/// Google Cloud Speech-to-Text (v1 REST)
pub struct CloudRecognizer {
    client: Client,
    endpoint: String,
    api_key: String,
    language_code: String,
    listen_window: Duration,
    record_command: String,
}

impl CloudRecognizer {
    /// `None` when no speech API key is configured.
    pub fn from_config(client: Client, config: &RecognizerConfig) -> Option<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())?;
        Some(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: api_key.to_string(),
            language_code: config.language_code.clone(),
            listen_window: Duration::from_secs(config.listen_secs.max(1)),
            record_command: config.record_command.clone(),
        })
    }

    pub async fn transcribe(&self, audio: &Linear16) -> Result<String, RecognitionError> {
        let body = RecognizeBody {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: audio.sample_rate,
                language_code: &self.language_code,
            },
            audio: RecognitionAudio {
                content: STANDARD.encode(audio.to_le_bytes()),
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let parsed: RecognizeResponse = response.json().await?;

        if let Some(err) = parsed.error {
            return Err(RecognitionError::Rejected(
                err.message.unwrap_or_else(|| format!("HTTP {}", status)),
            ));
        }
        if !status.is_success() {
            return Err(RecognitionError::Rejected(format!("HTTP {}", status)));
        }

        let transcript = parsed
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if transcript.is_empty() {
            Err(RecognitionError::Unintelligible)
        } else {
            Ok(transcript)
        }
    }

    pub async fn transcribe_file(&self, path: &Path) -> Result<String, RecognitionError> {
        let path = path.to_path_buf();
        let audio = tokio::task::spawn_blocking(move || load_linear16(&path))
            .await
            .map_err(|e| RecognitionError::Audio(e.to_string()))??;
        self.transcribe(&audio).await
    }

    /// Record one bounded window from the default input device.
    async fn record(&self, path: &Path) -> Result<(), RecognitionError> {
        let seconds = self.listen_window.as_secs().to_string();
        let rate = RECORD_SAMPLE_RATE.to_string();

        let mut command = Command::new(&self.record_command);
        command
            .args(["-q", "-f", "S16_LE", "-c", "1", "-r", rate.as_str(), "-d", seconds.as_str()])
            .arg(path)
            .kill_on_drop(true);

        let deadline = self.listen_window + Duration::from_secs(5);
        let status = tokio::time::timeout(deadline, command.status())
            .await
            .map_err(|_| RecognitionError::Audio("recording did not finish in time".to_string()))?
            .map_err(|e| RecognitionError::Audio(format!("{}: {}", self.record_command, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(RecognitionError::Audio(format!(
                "{} exited with {}",
                self.record_command, status
            )))
        }
    }

    fn recording_path() -> PathBuf {
        std::env::temp_dir().join(format!("kntr-{}.wav", Uuid::new_v4()))
    }
}

fn report(result: Result<String, RecognitionError>) -> Option<String> {
    match result {
        Ok(text) => {
            info!(%text, "Recognized speech");
            Some(text)
        }
        Err(RecognitionError::Unintelligible) => {
            info!("Could not understand the audio. Please try again.");
            None
        }
        Err(e) => {
            warn!(error = %e, "Speech recognition error");
            None
        }
    }
}

#[async_trait]
impl SpeechRecognizer for CloudRecognizer {
    async fn recognize_microphone(&self) -> Option<String> {
        let path = Self::recording_path();
        info!(seconds = self.listen_window.as_secs(), "Listening... Please speak now.");

        let result = match self.record(&path).await {
            Ok(()) => {
                debug!("Processing audio...");
                self.transcribe_file(&path).await
            }
            Err(e) => Err(e),
        };

        if let Err(e) = tokio::fs::remove_file(&path).await {
            debug!(path = %path.display(), error = %e, "Could not remove recording");
        }
        report(result)
    }

    async fn recognize_file(&self, path: &Path) -> Option<String> {
        report(self.transcribe_file(path).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, channels: u16, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn loads_and_downmixes_stereo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_wav(&path, 2, &[100, 300, -200, -400]);

        let audio = load_linear16(&path).unwrap();
        assert_eq!(audio.sample_rate, 16_000);
        assert_eq!(audio.samples, vec![200, -300]);
        assert_eq!(audio.to_le_bytes(), vec![200, 0, 0xD4, 0xFE]);
    }

    #[test]
    fn empty_wav_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.wav");
        write_wav(&path, 1, &[]);
        assert!(load_linear16(&path).is_err());
    }

    #[test]
    fn rescales_other_bit_depths() {
        assert_eq!(scale_to_i16(0x7F_FFFF, 24), 0x7FFF);
        assert_eq!(scale_to_i16(1, 8), 256);
        assert_eq!(scale_to_i16(-5, 16), -5);
    }

    #[test]
    fn recognizer_needs_api_key() {
        let client = Client::new();
        let unconfigured = RecognizerConfig::default();
        assert!(CloudRecognizer::from_config(client.clone(), &unconfigured).is_none());

        let config = RecognizerConfig {
            api_key: Some("key".to_string()),
            ..RecognizerConfig::default()
        };
        assert!(CloudRecognizer::from_config(client, &config).is_some());
    }
}
