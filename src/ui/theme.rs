//! Prompt styling
//!
//! Magenta marks whatever the operator is answering right now. Validation
//! problems are yellow because the prompt stays open, and a cancelled prompt
//! turns red. Answered prompts fade so the command output below them stands out.

use cliclack::ThemeState;
use console::Style;

/// Mask shown for typed passwords
const MASK: char = '•';

#[derive(Debug, Clone)]
pub struct DeskTheme {
    accent: Style,
}

impl DeskTheme {
    pub fn new() -> Self {
        Self {
            accent: Style::new().magenta(),
        }
    }
}

impl Default for DeskTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl cliclack::Theme for DeskTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => self.accent.clone(),
            ThemeState::Error(_) => Style::new().yellow(),
            ThemeState::Cancel => Style::new().red(),
            ThemeState::Submit => Style::new().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Submit => Style::new().green(),
            other => self.bar_color(other),
        }
    }

    fn input_style(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Cancel => Style::new().dim().strikethrough(),
            ThemeState::Submit => Style::new().dim(),
            _ => Style::new().bold(),
        }
    }

    fn password_mask(&self) -> char {
        MASK
    }
}

/// Use [`DeskTheme`] for every prompt from here on
pub fn init_theme() {
    cliclack::set_theme(DeskTheme::new());
}
