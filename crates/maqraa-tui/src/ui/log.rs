//! Activity log panel

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

use crate::app::{App, Focus};
use crate::config;

/// Render the activity log
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let border = if app.focus == Focus::Log {
        config::focused_border()
    } else {
        config::normal_border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Activity ");

    let items: Vec<ListItem> = app
        .log
        .iter()
        .map(|entry| {
            let line = Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    entry.message.clone(),
                    Style::default().fg(config::level_color(entry.level)),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
