use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiMode {
    Auto,   // Use emoji if the terminal supports Unicode
    Always, // Always use emoji
    Never,  // Never use emoji
}

impl EmojiMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn should_use_emoji(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub emoji: EmojiMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            emoji: EmojiMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, emoji: EmojiMode) -> Self {
        Self { color, emoji }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // NO_COLOR per the no-color.org standard
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// ASCII-only output, no colors, no emoji
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            emoji: EmojiMode::Never,
        }
    }
}

/// Resolved styling for checklist rendering. Construct once from a
/// [`FormattingConfig`] and pass to whatever is printing.
#[derive(Debug, Clone, Copy)]
pub struct Styler {
    use_color: bool,
    use_emoji: bool,
}

impl Styler {
    pub fn new(config: FormattingConfig) -> Self {
        let use_color = config.color.should_use_color();
        colored::control::set_override(use_color);
        Self {
            use_color,
            use_emoji: config.emoji.should_use_emoji(),
        }
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, |t| t.green().to_string())
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red().to_string())
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow().to_string())
    }

    pub fn info(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan().to_string())
    }

    pub fn banner(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan().bold().to_string())
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(text, |t| t.bold().to_string())
    }

    /// Pass icon for an individual check line
    pub fn check_pass(&self) -> String {
        self.success(self.emoji("✓", "[x]"))
    }

    /// Fail icon for an individual check line
    pub fn check_fail(&self) -> String {
        self.error(self.emoji("✗", "[ ]"))
    }

    /// Section icon for a fully scored manifest
    pub fn section_done(&self) -> String {
        self.success(self.emoji("✅", "[DONE]"))
    }

    /// Section icon for a manifest with points still missing
    pub fn section_pending(&self) -> String {
        self.warning(self.emoji("⏳", "[TODO]"))
    }

    pub fn celebrate(&self) -> &'static str {
        self.emoji("🎉 ", "")
    }

    pub fn wheel(&self) -> &'static str {
        self.emoji("☸️  ", "")
    }

    /// Fill and empty cells for the score bar
    pub fn bar_cells(&self) -> (&'static str, &'static str) {
        if self.use_emoji {
            ("█", "░")
        } else {
            ("#", "-")
        }
    }

    pub fn emoji(&self, emoji: &'static str, fallback: &'static str) -> &'static str {
        if self.use_emoji {
            emoji
        } else {
            fallback
        }
    }

    fn paint(&self, text: &str, apply: impl Fn(&str) -> String) -> String {
        if self.use_color {
            apply(text)
        } else {
            text.to_string()
        }
    }
}

fn detect_color_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}
