use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use super::super::constants::TASK_LIST_HIGHLIGHT_SYMBOL;
use super::super::view::Ui;
use super::util::{completion_marker, truncate_with_ellipsis};

impl Ui {
    pub(in crate::tui) fn draw_task_list(&self, f: &mut Frame<'_>, area: Rect) {
        let title_width = usize::from(area.width.saturating_sub(8));
        let visible = self.app.visible_tasks();
        let items = if visible.is_empty() {
            vec![ListItem::new(Line::from(self.empty_list_text()))]
        } else {
            visible
                .iter()
                .map(|task| {
                    let marker_style = if task.completed {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    let mut title_style = Style::default().add_modifier(Modifier::BOLD);
                    if task.completed {
                        title_style = title_style.add_modifier(Modifier::CROSSED_OUT);
                    }
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{} ", completion_marker(task)), marker_style),
                        Span::styled(truncate_with_ellipsis(&task.title, title_width), title_style),
                    ]))
                })
                .collect()
        };

        let summary = self.app.summary();
        let title = format!("Tasks ({}/{})", visible.len(), summary.total);
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(TASK_LIST_HIGHLIGHT_SYMBOL);
        let mut state = ListState::default();
        if !visible.is_empty() {
            state.select(Some(self.app.selected_index()));
        }
        f.render_stateful_widget(list, area, &mut state);
    }

    fn empty_list_text(&self) -> &'static str {
        let state = self.app.list_state();
        if state.data.is_none() {
            if state.loading {
                return "Loading tasks...";
            }
            if state.error.is_some() {
                return "Could not load tasks";
            }
        }
        if self.app.tasks().is_empty() {
            "No tasks"
        } else {
            "No tasks match the filter"
        }
    }
}
