use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kntr")]
#[command(about = "English to Kannada translator with speech output and input.")]
#[command(version)]
pub struct Cli {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Speak the Kannada translation
    #[arg(short = 's', long)]
    pub speak: bool,

    /// Speak the English source text first
    #[arg(long)]
    pub speak_english: bool,

    /// Save the spoken Kannada translation to a WAV file
    #[arg(short = 'o', long, value_name = "FILE")]
    pub save_audio: Option<PathBuf>,

    /// Translate every non-empty line of FILE
    #[arg(short = 'b', long, value_name = "FILE", conflicts_with_all = ["listen", "audio"])]
    pub batch: Option<PathBuf>,

    /// Speech rate in words per minute (50-300)
    #[arg(long, value_name = "WPM")]
    pub rate: Option<u32>,

    /// Speech volume (0.0-1.0)
    #[arg(long)]
    pub volume: Option<f32>,

    /// Recognize speech from the microphone and translate it
    #[arg(short = 'l', long, conflicts_with = "audio")]
    pub listen: bool,

    /// Recognize speech from a WAV file and translate it
    #[arg(short = 'a', long, value_name = "FILE")]
    pub audio: Option<PathBuf>,

    /// Show which providers were tried
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// List text-to-speech voices
    #[arg(long)]
    pub voices: bool,

    /// Start the HTTP API server
    #[arg(long)]
    pub serve: bool,

    /// Address to bind with --serve
    #[arg(long, requires = "serve")]
    pub host: Option<String>,

    /// Port to bind with --serve
    #[arg(long, requires = "serve")]
    pub port: Option<u16>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Edit configuration file
    #[arg(long)]
    pub edit_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// English text to translate
    #[arg(num_args = 1..)]
    pub text: Vec<String>,
}
