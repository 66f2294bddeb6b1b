//! Roster tab bar

use ratatui::prelude::*;
use ratatui::widgets::Tabs;

use crate::app::{App, Tab};
use crate::config;

/// Render the tab bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.title())).collect();
    let selected = Tab::ALL
        .iter()
        .position(|tab| *tab == app.tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(config::header_style())
        .divider(" │ ");

    frame.render_widget(tabs, area);
}
