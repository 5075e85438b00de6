//! Appearance settings and the render context built from them.
//!
//! The render context is created once in [`crate::tui::run`] before the first
//! activity starts, stored in the activity context, and never mutated.

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Light or dark terminal appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppearanceMode {
    #[default]
    Dark,
    Light,
}

/// Accent color family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTheme {
    #[default]
    Blue,
    Green,
    DarkBlue,
}

impl ColorTheme {
    fn accent_hex(self) -> &'static str {
        match self {
            Self::Blue => "#1f6aa5",
            Self::Green => "#2fa572",
            Self::DarkBlue => "#1f538d",
        }
    }
}

/// Border colors cycled across columns so neighbours are easy to tell apart.
const COLUMN_BORDER_HEX: [&str; 10] = [
    "#1f538d", "#14a085", "#8e44ad", "#c0392b", "#d68910", "#117864", "#6c3483", "#884ea0",
    "#1a5490", "#196f3d",
];

/// Parse a CSS color into a terminal color, falling back to `Color::Reset`.
pub fn css_to_color(css: &str) -> Color {
    match csscolorparser::parse(css) {
        Ok(c) => {
            let [r, g, b, _] = c.to_rgba8();
            Color::Rgb(r, g, b)
        }
        Err(e) => {
            tracing::warn!(css, error = %e, "invalid theme color");
            Color::Reset
        }
    }
}

/// Colors used by every activity.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub mode: AppearanceMode,
    pub theme: ColorTheme,
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub background: Color,
    pub warning: Color,
    pub error: Color,
    pub success: Color,
    column_borders: [Color; 10],
}

impl RenderContext {
    pub fn new(mode: AppearanceMode, theme: ColorTheme) -> Self {
        let (text, dim, background) = match mode {
            AppearanceMode::Dark => (Color::White, Color::DarkGray, Color::Reset),
            AppearanceMode::Light => (Color::Black, Color::Gray, Color::White),
        };

        Self {
            mode,
            theme,
            accent: css_to_color(theme.accent_hex()),
            text,
            dim,
            background,
            warning: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            column_borders: COLUMN_BORDER_HEX.map(css_to_color),
        }
    }

    /// Border color for the column at `index`.
    pub fn column_border(&self, index: usize) -> Color {
        self.column_borders[index % self.column_borders.len()]
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(AppearanceMode::default(), ColorTheme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(css_to_color("#1f538d"), Color::Rgb(0x1f, 0x53, 0x8d));
        assert_eq!(css_to_color("not a color"), Color::Reset);
    }

    #[test]
    fn column_borders_cycle() {
        let ctx = RenderContext::default();
        assert_eq!(ctx.column_border(0), ctx.column_border(10));
        assert_ne!(ctx.column_border(0), ctx.column_border(1));
    }

    #[test]
    fn theme_sets_accent() {
        let ctx = RenderContext::new(AppearanceMode::Light, ColorTheme::Green);
        assert_eq!(ctx.accent, Color::Rgb(0x2f, 0xa5, 0x72));
        assert_eq!(ctx.text, Color::Black);
    }
}
