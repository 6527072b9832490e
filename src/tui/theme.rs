//! Shared style tokens for the three screens.

use ratatui::style::{Color, Modifier, Style};

use crate::catalog::CategoryInfo;
use crate::ranking::Emphasis;

pub const INDIGO: Color = Color::Rgb(0x4F, 0x46, 0xE5);
pub const INDIGO_LIGHT: Color = Color::Rgb(0x63, 0x66, 0xF1);
pub const PINK: Color = Color::Rgb(0xDB, 0x27, 0x77);
pub const RED: Color = Color::Rgb(0xEF, 0x44, 0x44);
pub const SLATE: Color = Color::Rgb(0x47, 0x55, 0x69);

pub fn title() -> Style {
    Style::default().fg(INDIGO).add_modifier(Modifier::BOLD)
}

pub fn header() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn border() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn selected_a() -> Style {
    Style::default().fg(INDIGO).add_modifier(Modifier::BOLD)
}

pub fn selected_b() -> Style {
    Style::default().fg(PINK).add_modifier(Modifier::BOLD)
}

pub fn status() -> Style {
    Style::default().fg(Color::Green)
}

/// Terminal color for a category's display color.
pub fn category_color(info: &CategoryInfo) -> Color {
    info.rgb()
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(SLATE)
}

/// Chart label style: top three bold indigo, bottom three red.
pub fn label(emphasis: Emphasis) -> Style {
    match emphasis {
        Emphasis::Top => Style::default().fg(INDIGO).add_modifier(Modifier::BOLD),
        Emphasis::Bottom => Style::default().fg(RED),
        Emphasis::Normal => Style::default().fg(SLATE).add_modifier(Modifier::BOLD),
    }
}
