//! UI rendering modules

mod details;
mod help;
mod layout;
mod log;
mod roster;
mod statusbar;
mod tabs;

use ratatui::prelude::*;

use crate::app::App;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let areas = layout::calculate_layout(frame.area());

    tabs::render(frame, app, areas.tabs);
    roster::render(frame, app, areas.roster);
    details::render(frame, app, areas.details);
    log::render(frame, app, areas.log);
    statusbar::render(frame, app, areas.statusbar);

    // Render help popup if active
    if app.show_help {
        help::render(frame);
    }
}
