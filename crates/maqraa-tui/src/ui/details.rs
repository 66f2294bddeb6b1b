//! Detail panel for the selected roster entry

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, Details, Focus};
use crate::config;

fn field(label: &str, value: Option<&str>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), config::header_style()),
        Span::raw(value.unwrap_or("-").to_string()),
    ])
}

/// Render the details panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let border = if app.focus == Focus::Details {
        config::focused_border()
    } else {
        config::normal_border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Details ");

    let lines: Vec<Line> = match &app.details {
        None => vec![Line::from("Press Enter on a row to open it")],
        Some(Details::User(user)) => {
            let role = user.role.map(|r| r.as_str().to_string());
            vec![
                field("Name", user.full_name.as_deref()),
                field("Phone", user.phone.as_deref()),
                field("Email", user.email.as_deref()),
                field("Role", role.as_deref()),
                field("Group", user.resident_group.as_deref()),
            ]
        }
        Some(Details::Circle { circle, members }) => {
            let mut lines = vec![
                field("Name", circle.name.as_deref()),
                field("Teacher", circle.teacher_name.as_deref()),
                field("Days", circle.days.as_deref()),
                field(
                    "Time",
                    Some(&format!(
                        "{} - {}",
                        circle.start_time.as_deref().unwrap_or("-"),
                        circle.end_time.as_deref().unwrap_or("-"),
                    )),
                ),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Members ({})", members.len()),
                    config::header_style(),
                )),
            ];
            lines.extend(members.iter().map(|m| {
                Line::from(format!(
                    "  {} {}",
                    m.student_id,
                    m.student_name.as_deref().unwrap_or("-")
                ))
            }));
            lines
        }
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
