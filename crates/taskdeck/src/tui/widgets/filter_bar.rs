use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::super::constants::STATUS_DROPDOWN_WIDTH;
use super::super::view::{Focus, Ui};

impl Ui {
    /// Text filter input next to the status dropdown trigger.
    pub(in crate::tui) fn draw_filter_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(STATUS_DROPDOWN_WIDTH)])
            .split(area);

        let editing = self.focus == Focus::Filter;
        let text = self.filter_input.latest();
        let mut spans = vec![Span::raw(text.as_str())];
        if editing {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        } else if text.is_empty() {
            spans.push(Span::styled(
                "press / to filter",
                Style::default().fg(Color::DarkGray),
            ));
        }
        if self.filter_input.is_pending() {
            spans.push(Span::styled(" …", Style::default().fg(Color::DarkGray)));
        }

        let border = if editing {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let input = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title("Filter")
                .borders(Borders::ALL)
                .border_style(border),
        );
        f.render_widget(input, columns[0]);

        let open = self.focus == Focus::StatusPicker;
        let arrow = if open { "▲" } else { "▼" };
        let trigger = Paragraph::new(Line::from(vec![
            Span::styled(
                self.app.status_filter().label(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {arrow}")),
        ]))
        .block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(trigger, columns[1]);
    }
}
