use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::super::constants::SPINNER_FRAMES;
use super::super::view::Ui;

impl Ui {
    /// Spinner while a request is pending, completion gauge otherwise.
    pub(in crate::tui) fn draw_progress(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(self.progress_title())
            .borders(Borders::ALL);

        if self.app.is_busy() {
            let frame = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            let spinner = Paragraph::new(Line::from(vec![
                Span::styled(frame, Style::default().fg(Color::Cyan)),
                Span::raw(" Loading tasks"),
            ]))
            .block(block);
            f.render_widget(spinner, area);
            return;
        }

        let summary = self.app.summary();
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .ratio(summary.ratio())
            .label(format!("{}/{} done", summary.completed, summary.total));
        f.render_widget(gauge, area);
    }

    fn progress_title(&self) -> String {
        let mut title = format!("Progress · {}", self.app.source());
        if self.app.is_polling() {
            title.push_str(" · polling");
        }
        title
    }
}
