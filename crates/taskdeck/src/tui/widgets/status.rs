use std::borrow::Cow;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::super::view::{Focus, Message, MessageLevel, Ui};

impl Ui {
    /// Transient alert banner.
    pub(in crate::tui) fn draw_alert(&self, f: &mut Frame<'_>, area: Rect) {
        let title = match self.message.as_ref().map(|msg| msg.level) {
            Some(MessageLevel::Error) => "Error",
            _ => "Status",
        };
        let alert = Paragraph::new(self.status_text())
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(self.status_style()),
            )
            .style(self.status_style())
            .wrap(Wrap { trim: true });
        f.render_widget(alert, area);
    }

    pub(in crate::tui) fn draw_key_hints(&self, f: &mut Frame<'_>, area: Rect) {
        let key = Style::default()
            .fg(Color::Black)
            .bg(Color::Gray)
            .add_modifier(Modifier::BOLD);
        let mut spans = Vec::new();
        for (keys, action) in self.key_hints() {
            spans.push(Span::styled(format!(" {keys} "), key));
            spans.push(Span::raw(format!(" {action}  ")));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    pub(in crate::tui) const fn key_hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.focus {
            Focus::List => &[
                ("j/k", "move"),
                ("space", "done"),
                ("/", "filter"),
                ("s", "status"),
                ("r", "refresh"),
                ("R", "retry"),
                ("z", "reset"),
                ("d", "details"),
                ("q", "quit"),
            ],
            Focus::Filter => &[("enter", "apply"), ("esc", "back"), ("bksp", "delete")],
            Focus::StatusPicker => &[("j/k", "move"), ("enter", "select"), ("esc", "close")],
        }
    }

    fn status_text(&self) -> Cow<'_, str> {
        self.message
            .as_ref()
            .map_or(Cow::Borrowed("Ready"), |msg| Cow::Borrowed(msg.text.as_str()))
    }

    fn status_style(&self) -> Style {
        self.message.as_ref().map_or_else(Style::default, Message::style)
    }
}
