use colored::{Color, Colorize};

use crate::cli::output::{colors_active, current_preferences};

#[derive(Clone, Debug)]
pub struct UiStyle {
    pub horizontal: char,
    pub use_color: bool,
    pub color_header: Option<Color>,
    pub plain_mode: bool,
}

impl UiStyle {
    /// Derives the style from the active output preferences.
    pub fn detect() -> Self {
        let prefs = current_preferences();
        let use_color = colors_active(&prefs);
        Self {
            horizontal: if prefs.plain_mode { '-' } else { '─' },
            use_color,
            color_header: use_color.then_some(Color::BrightBlue),
            plain_mode: prefs.plain_mode,
        }
    }

    /// Uncolored ASCII style with rules, independent of global preferences.
    pub fn ascii() -> Self {
        Self {
            horizontal: '-',
            use_color: false,
            color_header: None,
            plain_mode: false,
        }
    }

    pub fn horizontal_line(&self, width: usize) -> String {
        self.horizontal.to_string().repeat(width.max(40))
    }

    pub fn apply_header_style(&self, text: &str) -> String {
        if self.use_color {
            match self.color_header {
                Some(color) => text.color(color).bold().to_string(),
                None => text.bold().to_string(),
            }
        } else {
            text.to_string()
        }
    }
}
