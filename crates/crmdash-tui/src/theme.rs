//! Colors and shared styles.
//!
//! Screens pick colors by role (accent, info, failure) rather than by hue so
//! the palette can change in one place.

use ratatui::style::{Color, Modifier, Style};

// ── Palette ───────────────────────────────────────────────────────────

/// Focus, selection, the active screen.
pub const ACCENT: Color = Color::Rgb(122, 162, 247);
/// Titles, headers, keys in hints.
pub const INFO: Color = Color::Rgb(125, 207, 255);
/// The active search text.
pub const QUERY: Color = Color::Rgb(255, 158, 100);
pub const WARN: Color = Color::Rgb(224, 175, 104);
pub const OK: Color = Color::Rgb(158, 206, 106);
pub const FAILURE: Color = Color::Rgb(247, 118, 142);

pub const TEXT: Color = Color::Rgb(192, 202, 245);
pub const MUTED: Color = Color::Rgb(86, 95, 137);
pub const ROW_BG: Color = Color::Rgb(41, 46, 66);
/// Fill behind overlays and toasts.
pub const PANEL_BG: Color = Color::Rgb(26, 27, 38);

// ── Styles ────────────────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(INFO).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT)
}

pub fn border_default() -> Style {
    Style::default().fg(MUTED)
}

/// Border of a form field that failed validation, or a failed load panel.
pub fn border_error() -> Style {
    Style::default().fg(FAILURE)
}

pub fn table_header() -> Style {
    Style::default().fg(INFO).add_modifier(Modifier::BOLD)
}

pub fn table_row() -> Style {
    Style::default().fg(TEXT)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(ROW_BG)
        .add_modifier(Modifier::BOLD)
}

/// Current entry of the sidebar or the category row.
pub fn tab_active() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(TEXT)
}

pub fn key_hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(INFO).add_modifier(Modifier::BOLD)
}
