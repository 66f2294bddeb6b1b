//! TUI styling

use ratatui::style::{Color, Modifier, Style};

use maqraa_api::dto::user::UserRole;

use crate::app::LogLevel;

/// Role accent color
pub fn role_color(role: Option<UserRole>) -> Color {
    match role {
        Some(UserRole::Student) => Color::Green,
        Some(UserRole::Teacher) => Color::Cyan,
        Some(UserRole::Manager) => Color::Magenta,
        None => Color::White,
    }
}

/// Active/inactive marker
pub fn active_symbol(is_active: Option<bool>) -> &'static str {
    match is_active {
        Some(true) => "●",
        Some(false) => "○",
        None => "?",
    }
}

/// Spinner frame while a list is loading
pub fn loading_symbol(tick: u64) -> &'static str {
    match tick % 4 {
        0 => "◐",
        1 => "◓",
        2 => "◑",
        _ => "◒",
    }
}

/// Log level color
pub fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Info => Color::White,
        LogLevel::Success => Color::Green,
        LogLevel::Warning => Color::Yellow,
        LogLevel::Error => Color::Red,
    }
}

/// Header style
pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Selected row style
pub fn selected_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

/// Focused panel border style
pub fn focused_border() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Unfocused panel border style
pub fn normal_border() -> Style {
    Style::default().fg(Color::DarkGray)
}
