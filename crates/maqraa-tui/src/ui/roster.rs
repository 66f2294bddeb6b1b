//! Roster list panel

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use unicode_width::UnicodeWidthStr;

use maqraa_api::dto::circle::Circle;
use maqraa_api::dto::user::LookupUser;

use crate::app::{App, Focus, Tab};
use crate::config;

/// Clip a cell to the column width.
fn clip(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + 2 > width {
            out.push('…');
            return out;
        }
        out.push(c);
    }
    out
}

fn user_row(user: &LookupUser) -> Row<'static> {
    let name = user.full_name.clone().unwrap_or_default();
    let phone = user.phone.clone().unwrap_or_default();
    Row::new(vec![
        Cell::from(user.id.to_string()),
        Cell::from(clip(&name, 28)),
        Cell::from(phone),
        Cell::from(config::active_symbol(user.is_active))
            .style(Style::default().fg(config::role_color(user.role))),
    ])
}

fn circle_row(circle: &Circle) -> Row<'static> {
    let name = circle.name.clone().unwrap_or_default();
    let teacher = circle.teacher_name.clone().unwrap_or_default();
    let occupancy = match (circle.student_count, circle.capacity) {
        (Some(count), Some(capacity)) => format!("{count}/{capacity}"),
        (Some(count), None) => count.to_string(),
        _ => String::new(),
    };
    Row::new(vec![
        Cell::from(circle.id.to_string()),
        Cell::from(clip(&name, 24)),
        Cell::from(clip(&teacher, 20)),
        Cell::from(circle.days.clone().unwrap_or_default()),
        Cell::from(occupancy),
    ])
}

/// Render the roster list for the active tab
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let border = if app.focus == Focus::Roster {
        config::focused_border()
    } else {
        config::normal_border()
    };

    let loaded = app.current_len();
    let total = app.current_total();
    let mut title = format!(" {} ({loaded}/{total}) ", app.tab.title());
    if app.current_loading() {
        title.push_str(config::loading_symbol(app.tick));
        title.push(' ');
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);

    let selected = app.current_selected();

    let (header, widths, rows): (Row, Vec<Constraint>, Vec<Row>) = match app.tab {
        Tab::Circles => (
            Row::new(vec!["ID", "Name", "Teacher", "Days", "Seats"])
                .style(config::header_style()),
            vec![
                Constraint::Length(6),
                Constraint::Min(18),
                Constraint::Length(20),
                Constraint::Length(12),
                Constraint::Length(7),
            ],
            app.circles.pager.items().iter().map(circle_row).collect(),
        ),
        _ => {
            let items = match app.tab {
                Tab::Students => app.students.pager.items(),
                Tab::Teachers => app.teachers.pager.items(),
                _ => app.managers.pager.items(),
            };
            (
                Row::new(vec!["ID", "Name", "Phone", ""]).style(config::header_style()),
                vec![
                    Constraint::Length(6),
                    Constraint::Min(20),
                    Constraint::Length(16),
                    Constraint::Length(2),
                ],
                items.iter().map(user_row).collect(),
            )
        }
    };

    let rows: Vec<Row> = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            if i == selected {
                row.style(config::selected_style())
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
