//! Terminal output setup
//!
//! Built once at startup and handed to the command handlers. Terminals that
//! cannot render emoji get ASCII status markers instead, and colour is only
//! used when stderr supports it and NO_COLOR is unset.

use console::{style, Term};

use crate::env::logging as env_vars;

#[derive(Debug, Clone, Copy)]
pub struct TerminalStyle {
    emoji: bool,
    colors: bool,
}

impl TerminalStyle {
    /// Inspect the attached terminal and environment
    pub fn detect() -> Self {
        let no_color = std::env::var(env_vars::NO_COLOR).is_ok();
        if no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        Self {
            emoji: Term::stderr().features().wants_emoji(),
            colors: !no_color && console::colors_enabled_stderr(),
        }
    }

    /// ASCII-only output without colour
    pub fn plain() -> Self {
        Self {
            emoji: false,
            colors: false,
        }
    }

    pub fn success(&self) -> &'static str {
        if self.emoji {
            "✅"
        } else {
            "[OK]"
        }
    }

    pub fn failure(&self) -> &'static str {
        if self.emoji {
            "❌"
        } else {
            "[ERROR]"
        }
    }

    pub fn hint(&self) -> &'static str {
        if self.emoji {
            "💡"
        } else {
            "[HINT]"
        }
    }

    /// Bracketed command prefix, e.g. `[Convert]`
    pub fn tag(&self, name: &str) -> String {
        let tag = format!("[{name}]");
        style(tag).cyan().bold().force_styling(self.colors).to_string()
    }

    pub fn colors_enabled(&self) -> bool {
        self.colors
    }
}

impl Default for TerminalStyle {
    fn default() -> Self {
        Self::detect()
    }
}
