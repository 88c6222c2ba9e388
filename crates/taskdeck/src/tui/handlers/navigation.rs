use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};

use super::super::view::{Focus, Ui};

impl Ui {
    pub(in crate::tui) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.focus {
            Focus::List => self.handle_task_list_key(key),
            Focus::Filter => self.handle_filter_key(key),
            Focus::StatusPicker => self.handle_status_picker_key(key),
        }
    }

    pub(in crate::tui) fn handle_mouse(&mut self, event: MouseEvent) {
        if self.focus == Focus::StatusPicker {
            self.handle_status_picker_mouse(&event);
        }
    }

    fn handle_task_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.app.select_prev(),
            KeyCode::Char('r') => {
                self.app.refresh();
                self.info("Refreshing tasks");
            }
            KeyCode::Char('R') => {
                if self.app.retry() {
                    self.info("Retrying last request");
                } else {
                    self.error("Nothing to retry");
                }
            }
            KeyCode::Char('z') => {
                self.app.reset();
                self.info("Cleared loaded tasks");
            }
            KeyCode::Char(' ' | 'x') => {
                if self.app.toggle_selected().is_none() {
                    self.error("No task selected");
                }
            }
            KeyCode::Char('d') => {
                let on = self.show_details.toggle();
                self.prefs.update(|prefs| {
                    let mut prefs = prefs.clone();
                    prefs.show_details = on;
                    prefs
                });
            }
            KeyCode::Char('/') => self.focus = Focus::Filter,
            KeyCode::Char('s') => self.open_status_picker(),
            KeyCode::Esc => self.clear_filter(),
            _ => {}
        }
    }
}
