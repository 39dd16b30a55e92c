use colored::Colorize;

pub struct Theme {
    pub title: fn(&str) -> String,
    pub label: fn(&str) -> String,
    pub source: fn(&str) -> String,
    pub target: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub idx: fn(&str) -> String,
    pub failed: fn(&str) -> String,
    pub note: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "temp" | "" => Self::temp(),
            "wudao" => Self::wudao(),
            "canvas" => Self::canvas(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::temp() // Fallback to default
            }
        }
    }

    fn temp() -> Self {
        Self {
            title: |s| s.bright_magenta().italic().bold().underline().to_string(),
            label: |s| s.cyan().to_string(),
            source: |s| s.white().to_string(),
            target: |s| s.yellow().bold().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_white().to_string(),
            failed: |s| s.red().italic().to_string(),
            note: |s| s.bright_white().dimmed().italic().to_string(),
        }
    }

    fn wudao() -> Self {
        Self {
            title: |s| s.red().italic().bold().underline().to_string(),
            label: |s| s.green().italic().to_string(),
            source: |s| s.cyan().to_string(),
            target: |s| s.bright_white().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.bright_white().to_string(),
            failed: |s| s.red().bold().to_string(),
            note: |s| s.bright_yellow().dimmed().italic().to_string(),
        }
    }

    fn canvas() -> Self {
        Self {
            title: |s| s.blue().bold().underline().to_string(),
            label: |s| s.bright_cyan().bold().to_string(),
            source: |s| s.magenta().to_string(),
            target: |s| s.black().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            idx: |s| s.cyan().to_string(),
            failed: |s| s.red().bold().to_string(),
            note: |s| s.bright_black().italic().to_string(),
        }
    }
}
