//! Help popup widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Render the help popup
pub fn render(frame: &mut Frame) {
    let help_text = r"
  Navigation
  ──────────
  j/↓       Move down
  k/↑       Move up
  g         Jump to first
  G         Jump to last
  Tab       Next roster tab
  Shift-Tab Previous roster tab
  f         Cycle panel focus
  Enter     Open details
  Esc       Close popup/details

  Lists
  ─────
  /         Search current roster
  r         Reload current roster

  General
  ───────
  ?         Toggle help
  q         Quit
";

    let area = frame.area();
    let popup_width = 48.min(area.width.saturating_sub(4));
    let popup_height = 24.min(area.height.saturating_sub(4));
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
