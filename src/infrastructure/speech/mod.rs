pub mod recognizer;
pub mod tts;

pub use recognizer::CloudRecognizer;
pub use tts::EspeakSynthesizer;
