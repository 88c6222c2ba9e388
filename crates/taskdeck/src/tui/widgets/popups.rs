use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use super::super::view::Ui;
use crate::tasks::StatusFilter;

impl Ui {
    pub(in crate::tui) fn draw_status_dropdown(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(picker) = &self.status_picker else {
            return;
        };
        let current = self.app.status_filter();

        let items: Vec<ListItem<'_>> = StatusFilter::ALL
            .iter()
            .map(|status| {
                let mut style = Style::default();
                if *status == current {
                    style = style.add_modifier(Modifier::BOLD);
                }
                ListItem::new(status.label()).style(style)
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan));
        let mut state = ListState::default();
        state.select(Some(picker.selected));

        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut state);
    }
}
