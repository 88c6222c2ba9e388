use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use super::super::view::{Focus, Ui};

impl Ui {
    pub(in crate::tui) fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                let mut text = self.filter_input.latest().clone();
                text.push(c);
                self.filter_input.set(text, Instant::now());
            }
            KeyCode::Backspace => {
                let mut text = self.filter_input.latest().clone();
                text.pop();
                self.filter_input.set(text, Instant::now());
            }
            KeyCode::Enter => {
                self.apply_filter_now();
                self.focus = Focus::List;
            }
            KeyCode::Esc => self.focus = Focus::List,
            _ => {}
        }
    }

    fn apply_filter_now(&mut self) {
        if let Some(text) = self.filter_input.flush() {
            let text = text.clone();
            self.app.set_text_filter(&text);
        }
    }

    pub(in crate::tui) fn clear_filter(&mut self) {
        if self.filter_input.latest().is_empty() && self.app.text_filter().is_empty() {
            return;
        }
        self.filter_input.set(String::new(), Instant::now());
        self.apply_filter_now();
        self.info("Filter cleared");
    }
}
