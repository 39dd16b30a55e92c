// Main entry point
use clap::Parser;
use colored::Colorize;
use kannada_translator::domain::model::{Language, TranslationOutcome};
use kannada_translator::infrastructure::config::{self, load_config, Logging};
use kannada_translator::interfaces::{api, cli::Cli};
use kannada_translator::presentation::{output, spinner::Spinner, theme::Theme};
use kannada_translator::state::AppState;
use std::future::Future;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = load_config()?;
    if let Some(rate) = cli.rate {
        config.speech.rate = rate;
    }
    if let Some(volume) = cli.volume {
        config.speech.volume = volume;
    }

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }
    if cli.edit_config {
        if let Some(config_path) = config::get_config_path() {
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            // Run editor in blocking task
            tokio::task::spawn_blocking(move || {
                std::process::Command::new(editor).arg(&config_path).status()
            })
            .await??;
        } else {
            eprintln!("{}", "Config file not found".red());
        }
        return Ok(());
    }

    let theme_name = cli.theme.clone().unwrap_or_else(|| config.theme.clone());
    let state = AppState::new(config).await?;

    if cli.status {
        print_status(&state);
        return Ok(());
    }

    let theme = Theme::from_name(&theme_name);

    if cli.voices {
        match &state.tts {
            Some(tts) => print!("{}", output::format_voices(&tts.list_voices().await?, &theme)),
            None => eprintln!("{}", "Text-to-speech engine not available".red()),
        }
        return Ok(());
    }

    if cli.serve {
        let host = cli.host.clone().unwrap_or_else(|| state.config.server.host.clone());
        let port = cli.port.unwrap_or(state.config.server.port);
        api::serve(state, &host, port).await?;
        return Ok(());
    }

    if let Some(path) = &cli.batch {
        let content = tokio::fs::read_to_string(path).await?;
        let texts: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        let chain = state.chain.clone();
        let Some(items) =
            run_cancellable("Translating...", async move { chain.translate_batch(&texts).await })
                .await?
        else {
            return Ok(());
        };

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&items)?);
        } else {
            print!("{}", output::format_batch(&items, &theme));
        }
        return Ok(());
    }

    let text = if cli.listen || cli.audio.is_some() {
        let Some(recognizer) = state.recognizer.clone() else {
            eprintln!(
                "{}",
                "Speech recognition is not configured (set GOOGLE_SPEECH_API_KEY)".red()
            );
            std::process::exit(1);
        };
        let audio = cli.audio.clone();
        let message = if audio.is_some() {
            "Processing audio..."
        } else {
            "Listening... Please speak now."
        };
        let recognized = run_cancellable(message, async move {
            match audio {
                Some(path) => recognizer.recognize_file(&path).await,
                None => recognizer.recognize_microphone().await,
            }
        })
        .await?;

        match recognized {
            Some(Some(text)) => text,
            Some(None) => {
                eprintln!("{}", "Could not understand the audio. Please try again.".red());
                std::process::exit(1);
            }
            None => return Ok(()),
        }
    } else {
        cli.text.join(" ")
    };

    if text.trim().is_empty() {
        eprintln!("{}", "Please provide text to translate".red());
        std::process::exit(1);
    }

    if cli.speak_english {
        speak(&state, &text, Language::English).await;
    }

    let chain = state.chain.clone();
    let source = text.clone();
    let Some(report) = run_cancellable("Translating...", async move {
        chain.translate_with_report(&source).await
    })
    .await?
    else {
        return Ok(());
    };

    if cli.json {
        let value = serde_json::json!({
            "english": text,
            "kannada": report.outcome.clone().into_text(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", output::format_translation(&text, &report.outcome, &theme));
        if cli.verbose {
            eprint!("{}", output::format_attempts(&report.attempts, &theme));
        }
    }

    let TranslationOutcome::Translated(kannada) = report.outcome else {
        std::process::exit(1);
    };

    if cli.speak {
        speak(&state, &kannada, Language::Kannada).await;
    }
    if let Some(path) = &cli.save_audio {
        match &state.tts {
            Some(tts) => {
                tts.save_to_file(&kannada, Language::Kannada, path).await?;
                eprintln!("Audio saved to: {}", path.display());
            }
            None => eprintln!("{}", "Text-to-speech engine not available".red()),
        }
    }

    Ok(())
}

/// Run `future` on a background task. Ctrl-C aborts the task, and with it
/// any provider call in flight, and yields `None`.
async fn run_cancellable<T, F>(message: &str, future: F) -> anyhow::Result<Option<T>>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let spinner = Spinner::new(message);
    let mut task = tokio::spawn(future);

    tokio::select! {
        result = &mut task => {
            spinner.stop();
            Ok(Some(result?))
        }
        _ = tokio::signal::ctrl_c() => {
            task.abort();
            spinner.stop();
            eprintln!("{}", "Interrupted".yellow());
            Ok(None)
        }
    }
}

async fn speak(state: &AppState, text: &str, language: Language) {
    match &state.tts {
        Some(tts) => {
            if let Err(e) = tts.speak(text, language).await {
                eprintln!("{}", format!("TTS error: {}", e).red());
            }
        }
        None => eprintln!("{}", "Text-to-speech engine not available".red()),
    }
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn print_status(state: &AppState) {
    println!("{}", "kntr Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );

    let providers = state.chain.providers();
    if providers.is_empty() {
        println!("Providers: {}", "None configured".red());
    } else {
        println!("Providers:");
        for (i, provider) in providers.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, provider.name, provider.kind);
        }
    }

    match &state.tts {
        Some(tts) => println!("Speech output: {}", tts.id()),
        None => println!("Speech output: Not available"),
    }
    if state.config.speech.headless {
        println!("  (headless, speech output is skipped)");
    }
    println!(
        "Speech input: {}",
        if state.recognizer.is_some() { "Configured" } else { "Not configured" }
    );
    println!(
        "Server: http://{}:{}",
        state.config.server.host, state.config.server.port
    );
}
