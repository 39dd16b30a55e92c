use crate::domain::error::TranslatorError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const PROVIDER_GOOGLE_WEB: &str = "google_web";
pub const PROVIDER_GOOGLE_CLOUD: &str = "google_cloud";
pub const PROVIDER_LIBRETRANSLATE: &str = "libretranslate";
pub const PROVIDER_MYMEMORY: &str = "mymemory";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProvidersConfig {
    /// Priority order; providers missing from this list are never tried
    #[serde(default = "default_order")]
    pub order: Vec<String>,
    #[serde(default)]
    pub google_web: GoogleWebConfig,
    #[serde(default)]
    pub google_cloud: GoogleCloudConfig,
    #[serde(default)]
    pub libretranslate: LibreTranslateConfig,
    #[serde(default)]
    pub mymemory: MyMemoryConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoogleWebConfig {
    #[serde(default = "default_enable")]
    pub enable: bool,
    #[serde(default = "default_google_web_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_short_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoogleCloudConfig {
    #[serde(default = "default_google_cloud_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
    /// JSON file holding `api_key` or `access_token`
    pub credentials_path: Option<String>,
    #[serde(default = "default_long_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LibreTranslateConfig {
    /// Base URL; the provider is left out of the chain when unset
    pub url: Option<String>,
    pub api_key: Option<String>,
    #[serde(default = "default_long_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MyMemoryConfig {
    #[serde(default = "default_enable")]
    pub enable: bool,
    #[serde(default = "default_mymemory_endpoint")]
    pub endpoint: String,
    /// Optional contact address; MyMemory grants a larger daily quota with it
    pub email: Option<String>,
    #[serde(default = "default_short_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    #[serde(default = "default_tts_command")]
    pub tts_command: String,
    #[serde(default = "default_rate")]
    pub rate: u32,
    #[serde(default = "default_volume")]
    pub volume: f32,
    #[serde(default)]
    pub headless: bool,
    #[serde(default = "default_synth_timeout")]
    pub synth_timeout_secs: u64,
    #[serde(default)]
    pub recognizer: RecognizerConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecognizerConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_speech_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_language_code")]
    pub language_code: String,
    #[serde(default = "default_listen_secs")]
    pub listen_secs: u64,
    #[serde(default = "default_record_command")]
    pub record_command: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            logging: Logging::default(),
            providers: ProvidersConfig::default(),
            speech: SpeechConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            order: default_order(),
            google_web: GoogleWebConfig::default(),
            google_cloud: GoogleCloudConfig::default(),
            libretranslate: LibreTranslateConfig::default(),
            mymemory: MyMemoryConfig::default(),
        }
    }
}

impl Default for GoogleWebConfig {
    fn default() -> Self {
        Self {
            enable: true,
            endpoint: default_google_web_endpoint(),
            timeout_secs: default_short_timeout(),
        }
    }
}

impl Default for GoogleCloudConfig {
    fn default() -> Self {
        Self {
            endpoint: default_google_cloud_endpoint(),
            api_key: None,
            credentials_path: None,
            timeout_secs: default_long_timeout(),
        }
    }
}

impl Default for LibreTranslateConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_secs: default_long_timeout(),
        }
    }
}

impl Default for MyMemoryConfig {
    fn default() -> Self {
        Self {
            enable: true,
            endpoint: default_mymemory_endpoint(),
            email: None,
            timeout_secs: default_short_timeout(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            tts_command: default_tts_command(),
            rate: default_rate(),
            volume: default_volume(),
            headless: false,
            synth_timeout_secs: default_synth_timeout(),
            recognizer: RecognizerConfig::default(),
        }
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_speech_endpoint(),
            language_code: default_language_code(),
            listen_secs: default_listen_secs(),
            record_command: default_record_command(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Layer environment variables over the file values.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Same as [`Config::apply_env_overrides`] with an injectable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get("GOOGLE_APPLICATION_CREDENTIALS") {
            self.providers.google_cloud.credentials_path = Some(path);
        }
        if let Some(key) = get("GOOGLE_TRANSLATE_API_KEY") {
            self.providers.google_cloud.api_key = Some(key);
        }
        if let Some(url) = get("LIBRETRANSLATE_URL") {
            self.providers.libretranslate.url = Some(url);
        }
        if let Some(key) = get("LIBRETRANSLATE_API_KEY") {
            self.providers.libretranslate.api_key = Some(key);
        }
        if let Some(key) = get("GOOGLE_SPEECH_API_KEY") {
            self.speech.recognizer.api_key = Some(key);
        }
        if let Some(flag) = get("HEADLESS") {
            self.speech.headless = !matches!(flag.to_lowercase().as_str(), "0" | "false" | "no");
        }
        if let Some(host) = get("KNTR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("KNTR_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => eprintln!("Warning: Ignoring invalid KNTR_PORT value: {}", port),
            }
        }
    }
}

// Defaults
fn default_theme() -> String {
    "temp".to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
pub fn default_order() -> Vec<String> {
    [
        PROVIDER_GOOGLE_WEB,
        PROVIDER_GOOGLE_CLOUD,
        PROVIDER_LIBRETRANSLATE,
        PROVIDER_MYMEMORY,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_google_web_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}
fn default_google_cloud_endpoint() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}
fn default_mymemory_endpoint() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}
fn default_short_timeout() -> u64 {
    10
}
fn default_long_timeout() -> u64 {
    30
}
fn default_tts_command() -> String {
    "espeak-ng".to_string()
}
fn default_rate() -> u32 {
    150
}
fn default_volume() -> f32 {
    0.9
}
fn default_synth_timeout() -> u64 {
    60
}
fn default_speech_endpoint() -> String {
    "https://speech.googleapis.com/v1/speech:recognize".to_string()
}
fn default_language_code() -> String {
    "en-US".to_string()
}
fn default_listen_secs() -> u64 {
    10
}
fn default_record_command() -> String {
    "arecord".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("kntr").join("config.toml"))
}

pub fn load_config() -> Result<Config, TranslatorError> {
    let mut config = match get_config_path() {
        Some(path) => load_config_from(&path)?,
        None => Config::default(),
    };
    config.apply_env_overrides();
    Ok(config)
}

/// Read a config file, falling back to defaults if it is missing or broken.
pub fn load_config_from(path: &Path) -> Result<Config, TranslatorError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    match toml::from_str::<Config>(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to parse config file: {}. Using defaults.",
                e
            );
            Ok(Config::default())
        }
    }
}

pub fn generate_config_sample() -> Result<(), TranslatorError> {
    let config_path = get_config_path();

    if let Some(path) = config_path {
        if path.exists() {
            eprintln!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        write_config_sample(&path)?;
        println!("Generated config file at: {}", path.display());
    } else {
        return Err(TranslatorError::Config(
            "Cannot determine config directory".to_string(),
        ));
    }

    Ok(())
}

pub fn write_config_sample(path: &Path) -> Result<(), TranslatorError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let sample = Config::default();
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| TranslatorError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, toml_content)
        .map_err(|e| TranslatorError::Config(format!("Failed to write config file: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_follow_canonical_provider_order() {
        let config = Config::default();
        assert_eq!(
            config.providers.order,
            vec!["google_web", "google_cloud", "libretranslate", "mymemory"]
        );
        assert_eq!(config.providers.google_web.timeout_secs, 10);
        assert_eq!(config.providers.mymemory.timeout_secs, 10);
        assert!(config.providers.libretranslate.url.is_none());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.logging.level, "WARN");
    }

    #[test]
    fn env_overrides_fill_credentials() {
        let env: HashMap<&str, &str> = [
            ("GOOGLE_TRANSLATE_API_KEY", "abc"),
            ("LIBRETRANSLATE_URL", "http://localhost:5001"),
            ("HEADLESS", "1"),
            ("KNTR_PORT", "8080"),
            ("GOOGLE_SPEECH_API_KEY", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.providers.google_cloud.api_key.as_deref(), Some("abc"));
        assert_eq!(
            config.providers.libretranslate.url.as_deref(),
            Some("http://localhost:5001")
        );
        assert!(config.speech.headless);
        assert_eq!(config.server.port, 8080);
        // blank values are ignored
        assert!(config.speech.recognizer.api_key.is_none());
    }

    #[test]
    fn invalid_port_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|k| (k == "KNTR_PORT").then(|| "http".to_string()));
        assert_eq!(config.server.port, 5000);
    }
}
