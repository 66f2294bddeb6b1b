//! Layout calculations for the TUI

use ratatui::prelude::*;

/// Layout areas for the UI
pub struct LayoutAreas {
    pub tabs: Rect,
    pub roster: Rect,
    pub details: Rect,
    pub log: Rect,
    pub statusbar: Rect,
}

/// Calculate layout areas based on terminal size
pub fn calculate_layout(area: Rect) -> LayoutAreas {
    // Main vertical split: tabs + content + status bar
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let tabs = vertical[0];
    let content_area = vertical[1];
    let statusbar = vertical[2];

    // Content: roster list (left) + details/log (right)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Roster list
            Constraint::Percentage(45), // Details + log
        ])
        .split(content_area);

    let roster = horizontal[0];

    // Right panel: details (top) + log (bottom)
    let right_panel = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Details
            Constraint::Percentage(40), // Log
        ])
        .split(horizontal[1]);

    LayoutAreas {
        tabs,
        roster,
        details: right_panel[0],
        log: right_panel[1],
        statusbar,
    }
}
