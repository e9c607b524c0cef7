//! Mapping from the page palette to terminal styles.

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::{Color as Rgba, Theme};

/// Terminal colour for a palette entry.  Alpha is ignored; callers skip
/// fully transparent colours themselves.
pub fn to_color(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

// ── chrome ─────────────────────────────────────────────────
pub fn status_bar_style(theme: &Theme) -> Style {
    Style::default()
        .bg(to_color(theme.secondary))
        .fg(to_color(theme.text_secondary))
}

pub fn status_link_style(theme: &Theme) -> Style {
    status_bar_style(theme)
        .fg(to_color(theme.primary))
        .add_modifier(Modifier::BOLD)
}

// ── page ───────────────────────────────────────────────────
pub fn placeholder_style(theme: &Theme) -> Style {
    Style::default()
        .fg(to_color(theme.text_secondary))
        .bg(to_color(theme.secondary))
}

pub fn scrollbar_track_style(theme: &Theme) -> Style {
    Style::default().fg(to_color(theme.scrollbar_track))
}

pub fn scrollbar_thumb_style(theme: &Theme, hovered: bool) -> Style {
    let c = if hovered {
        theme.scrollbar_thumb_hover
    } else {
        theme.scrollbar_thumb
    };
    Style::default().fg(to_color(c))
}
