//! Status bar widget

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    // error message wins, then search prompt, then key hints
    let status_line = if let Some(error) = &app.error_message {
        Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ))
    } else if app.search_active {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Yellow)),
            Span::raw(app.search_query.clone()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else {
        let position = format!("{}/{}", app.current_len(), app.current_total());
        let filter = match app.current_search() {
            Some(term) => format!("  filter: {term}"),
            None => String::new(),
        };
        let keybindings =
            "[j/k] Navigate  [Tab] Switch tab  [Enter] Open  [/] Search  [?] Help  [q] Quit";
        Line::from(vec![
            Span::styled(position, Style::default().fg(Color::Green)),
            Span::styled(filter, Style::default().fg(Color::Yellow)),
            Span::raw("  │  "),
            Span::styled(keybindings, Style::default().fg(Color::DarkGray)),
        ])
    };

    frame.render_widget(Paragraph::new(status_line), area);
}
