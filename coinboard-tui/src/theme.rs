//! Neon-on-charcoal theme tokens for the Coinboard TUI.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, headers, the price line)
//! - **Positive**: Neon green (gains, selected rows)
//! - **Negative**: Hot pink (losses, errors)
//! - **Warning**: Neon orange (alerts such as an empty export)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (hints, disabled pager buttons)

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Green for gains (including flat), pink for losses.
pub fn change_color(percent: f64) -> Color {
    if percent >= 0.0 {
        POSITIVE
    } else {
        NEGATIVE
    }
}

pub fn change_style(percent: f64) -> Style {
    Style::default().fg(change_color(percent))
}

/// Pager buttons dim when they cannot be pressed.
pub fn enabled(enabled: bool) -> Style {
    if enabled {
        text()
    } else {
        muted().add_modifier(Modifier::DIM)
    }
}
