use crate::domain::model::{BatchItem, ProviderAttempt, TranslationOutcome, Voice};
use crate::presentation::theme::Theme;
use std::fmt::Write;

const FAILED: &str = "Translation failed, please try again later";

fn write_pair(output: &mut String, english: &str, kannada: Option<&str>, theme: &Theme) {
    writeln!(output, "  {} {}", (theme.label)("EN"), (theme.source)(english)).ok();
    match kannada {
        Some(text) => writeln!(output, "  {} {}", (theme.label)("KN"), (theme.target)(text)).ok(),
        None => writeln!(output, "  {} {}", (theme.label)("KN"), (theme.failed)(FAILED)).ok(),
    };
}

/// Format a single translation for the terminal
pub fn format_translation(english: &str, outcome: &TranslationOutcome, theme: &Theme) -> String {
    let mut output = String::new();
    writeln!(output, "{}", (theme.title)("English → Kannada")).ok();

    let kannada = match outcome {
        TranslationOutcome::Translated(text) => Some(text.as_str()),
        TranslationOutcome::Failed(_) => None,
    };
    write_pair(&mut output, english, kannada, theme);
    writeln!(output).ok();
    output
}

pub fn format_batch(items: &[BatchItem], theme: &Theme) -> String {
    let mut output = String::new();
    let translated = items.iter().filter(|i| i.kannada.is_some()).count();
    writeln!(
        output,
        "{} {}",
        (theme.title)("English → Kannada"),
        (theme.note)(&format!("({}/{} translated)", translated, items.len()))
    )
    .ok();

    let cutoff = "⸺".repeat(40);
    for (i, item) in items.iter().enumerate() {
        writeln!(output, "  {}", (theme.line)(&cutoff)).ok();
        writeln!(output, "  {}.", (theme.idx)(&(i + 1).to_string())).ok();
        write_pair(&mut output, &item.english, item.kannada.as_deref(), theme);
    }
    writeln!(output).ok();
    output
}

/// One line per provider tried, for `--verbose`
pub fn format_attempts(attempts: &[ProviderAttempt], theme: &Theme) -> String {
    let mut output = String::new();
    for attempt in attempts {
        let verdict = match &attempt.failure {
            None => "accepted".to_string(),
            Some(failure) => failure.to_string(),
        };
        writeln!(
            output,
            "  {} {}",
            (theme.label)(attempt.provider),
            (theme.note)(&verdict)
        )
        .ok();
    }
    output
}

pub fn format_voices(voices: &[Voice], theme: &Theme) -> String {
    let mut output = String::new();
    for (i, voice) in voices.iter().enumerate() {
        writeln!(
            output,
            "{}: {} {}",
            (theme.idx)(&i.to_string()),
            voice.name,
            (theme.note)(&format!("({})", voice.id))
        )
        .ok();
    }
    output
}
