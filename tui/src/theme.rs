//! Color theme and glyphs for the Brochure TUI.
//!
//! Warm "paper and ink" palette by default with an optional high-contrast
//! override, plus an ASCII glyph set for terminals without good Unicode.

use ratatui::style::{Color, Modifier, Style};

use brochure_types::ui::UiOptions;

/// Default palette constants.
mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG_DARK: Color = Color::Rgb(24, 22, 20);
    pub const BG_PANEL: Color = Color::Rgb(34, 31, 28);
    pub const BG_HIGHLIGHT: Color = Color::Rgb(48, 44, 39);
    pub const BG_BORDER: Color = Color::Rgb(92, 84, 74);

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(232, 224, 209);
    pub const TEXT_SECONDARY: Color = Color::Rgb(196, 186, 167);
    pub const TEXT_MUTED: Color = Color::Rgb(133, 124, 110);

    // === Brand / accents ===
    pub const PRIMARY: Color = Color::Rgb(222, 147, 95); // terracotta
    pub const PRIMARY_DIM: Color = Color::Rgb(177, 126, 91);
    pub const ACCENT: Color = Color::Rgb(138, 180, 168); // sea green
    pub const SUCCESS: Color = Color::Rgb(158, 188, 114);
    pub const WARNING: Color = Color::Rgb(224, 192, 110);
    pub const ERROR: Color = Color::Rgb(224, 108, 108);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            primary: colors::PRIMARY,
            primary_dim: colors::PRIMARY_DIM,
            accent: colors::ACCENT,
            success: colors::SUCCESS,
            warning: colors::WARNING,
            error: colors::ERROR,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,
            primary: Color::White,
            primary_dim: Color::Gray,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for markers and the scrollbar.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    /// Cursor in the nav rail.
    pub selected: &'static str,
    /// Scroll-spy marker on the active link.
    pub active: &'static str,
    pub bullet: &'static str,
    pub arrow_up: &'static str,
    pub arrow_down: &'static str,
    pub track: &'static str,
    pub thumb: &'static str,
    /// Fill for heading underlines and horizontal rules.
    pub rule: &'static str,
    /// Blockquote gutter.
    pub quote: &'static str,
    /// Separator in the status bar.
    pub separator: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            selected: ">",
            active: "*",
            bullet: "*",
            arrow_up: "^",
            arrow_down: "v",
            track: "|",
            thumb: "#",
            rule: "-",
            quote: ">",
            separator: "|",
        }
    } else {
        Glyphs {
            selected: "▸",
            active: "●",
            bullet: "•",
            arrow_up: "↑",
            arrow_down: "↓",
            track: "│",
            thumb: "█",
            rule: "─",
            quote: "▎",
            separator: "│",
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn heading(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary_dim)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn tab_active(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.bg_highlight)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn tab_inactive(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }
}
