//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the plugin, supporting both
//! built-in themes and custom themes loaded from TOML files. It provides
//! utilities for converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `foodquest`: Dark theme with an orange accent (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#f97316"
//! selection_fg = "#1c1917"
//! selection_bg = "#fdba74"
//! text_normal = "#e7e5e4"
//! text_dim = "#78716c"
//! border = "#44403c"
//! search_bar_border = "#f97316"
//! match_highlight_fg = "#1c1917"
//! match_highlight_bg = "#facc15"
//! empty_state_fg = "#fb923c"
//! accent = "#f97316"
//! rating_fg = "#facc15"
//! open_fg = "#4ade80"
//! closed_fg = "#f87171"
//! error_fg = "#ef4444"
//! chip_active_fg = "#1c1917"
//! chip_active_bg = "#fb923c"
//! ```
//!
//! # Example
//!
//! ```rust
//! use foodquest::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! print!("{}", Theme::fg(&theme.colors.header_fg));
//! print!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{FoodQuestError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
///
/// Contains theme metadata and color definitions. Can be loaded from built-in
/// themes or custom TOML files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#f97316"). Optional fields
/// default to `None`, allowing themes to opt out of certain styling.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card and suggestion foreground color.
    pub selection_fg: String,
    /// Selected card and suggestion background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, addresses, timestamps).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search bar border color.
    pub search_bar_border: String,
    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    /// Welcome and no-match message color.
    pub empty_state_fg: String,

    /// Restaurant names, price badges and section titles.
    pub accent: String,
    /// Star ratings.
    pub rating_fg: String,
    /// "Open Now" badge.
    pub open_fg: String,
    /// "Closed" badge.
    pub closed_fg: String,
    /// Search failure message.
    pub error_fg: String,

    /// Selected filter chip foreground.
    pub chip_active_fg: String,
    /// Selected filter chip background.
    pub chip_active_bg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `foodquest`, `catppuccin-latte`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use foodquest::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("foodquest").unwrap();
    /// assert_eq!(theme.name, "foodquest");
    /// assert!(Theme::from_name("nope").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "foodquest" => include_str!("../../themes/foodquest.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FoodQuestError::Theme`] if:
    /// - The file cannot be read (file not found, permission denied, etc.)
    /// - The TOML content cannot be parsed (invalid syntax, missing fields, type mismatches)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| FoodQuestError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents).map_err(|e| FoodQuestError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// ```rust
    /// use foodquest::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#f97316"), "\u{1b}[38;2;249;115;22m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence (`\x1b[2m`).
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    ///
    /// Clears all styling (colors, bold, dim, etc.).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default `foodquest` theme.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("foodquest").expect("Built-in foodquest theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::default().name, "foodquest");
        assert_eq!(
            Theme::from_name("catppuccin-latte").map(|t| t.name).as_deref(),
            Some("catppuccin-latte")
        );
    }

    #[test]
    fn invalid_hex_falls_back_to_white() {
        assert_eq!(Theme::hex_to_rgb("#zzzzzz"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("#fff"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("000000"), (0, 0, 0));
    }

    #[test]
    fn theme_file_errors_are_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"broken\"").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(FoodQuestError::Theme(_))));
        assert!(matches!(Theme::from_file("/nonexistent/theme.toml"), Err(FoodQuestError::Theme(_))));
    }

    #[test]
    fn custom_theme_file_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let custom = toml::to_string(&Theme {
            name: "custom".to_string(),
            ..Theme::default()
        })
        .unwrap();
        file.write_all(custom.as_bytes()).unwrap();
        assert_eq!(Theme::from_file(file.path()).unwrap().name, "custom");
    }
}
