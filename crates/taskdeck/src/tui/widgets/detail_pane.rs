use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use taskdeck_client::Task;
use time::format_description::well_known::Rfc3339;

use super::super::view::Ui;

impl Ui {
    pub(in crate::tui) fn draw_detail(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = self
            .app
            .selected_task()
            .map_or_else(|| vec![Line::from("No task selected")], detail_lines);

        let detail = Paragraph::new(lines)
            .block(Block::default().title("Details").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(detail, area);
    }
}

fn detail_lines(task: &Task) -> Vec<Line<'_>> {
    let label = Style::default().fg(Color::DarkGray);
    let status_style = if task.completed {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let created = task
        .created_at
        .and_then(|at| at.format(&Rfc3339).ok())
        .unwrap_or_else(|| "-".to_owned());

    let mut lines = vec![
        Line::from(Span::styled(
            task.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("ID: ", label),
            Span::raw(task.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", label),
            Span::styled(task.status_label(), status_style),
        ]),
        Line::from(vec![Span::styled("Created: ", label), Span::raw(created)]),
        Line::default(),
    ];
    match task.description.as_deref() {
        Some(description) if !description.trim().is_empty() => {
            lines.extend(description.lines().map(Line::from));
        }
        _ => lines.push(Line::from(Span::styled("(no description)", label))),
    }
    lines
}
