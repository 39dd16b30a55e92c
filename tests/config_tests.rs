//! Config file loading tests

use kannada_translator::infrastructure::config::{
    default_order, load_config_from, write_config_sample, Config,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let config = load_config_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.theme, "temp");
    assert_eq!(config.providers.order, default_order());
    assert_eq!(config.server.port, 5000);
}

#[test]
fn partial_file_keeps_defaults_for_the_rest() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
theme = "wudao"

[logging]
level = "DEBUG"

[providers]
order = ["mymemory", "google_web"]

[providers.libretranslate]
url = "http://localhost:5001"

[speech]
rate = 120
"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();

    assert_eq!(config.theme, "wudao");
    assert!(config.logging.enable);
    assert_eq!(config.logging.level, "DEBUG");
    assert_eq!(config.providers.order, vec!["mymemory", "google_web"]);
    assert_eq!(
        config.providers.libretranslate.url.as_deref(),
        Some("http://localhost:5001")
    );
    assert!(config.providers.google_web.enable);
    assert_eq!(config.providers.google_web.timeout_secs, 10);
    assert_eq!(config.providers.google_cloud.timeout_secs, 30);
    assert_eq!(config.speech.rate, 120);
    assert_eq!(config.speech.tts_command, "espeak-ng");
    assert_eq!(config.speech.recognizer.language_code, "en-US");
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
fn broken_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "theme = [not toml").unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.theme, Config::default().theme);
    assert_eq!(config.providers.order, default_order());
}

#[test]
fn written_sample_loads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    write_config_sample(&path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[providers.mymemory]"));
    assert!(content.contains("[server]"));

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.providers.order, default_order());
    assert_eq!(config.speech.rate, 150);
    assert_eq!(config.server.port, 5000);
}
