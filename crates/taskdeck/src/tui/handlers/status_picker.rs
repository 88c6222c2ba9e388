use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use super::super::view::{Focus, StatusPickerState, Ui};
use crate::tasks::StatusFilter;

impl Ui {
    pub(in crate::tui) fn handle_status_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.close_status_picker(),
            KeyCode::Down | KeyCode::Char('j') => self.status_picker_down(),
            KeyCode::Up | KeyCode::Char('k') => self.status_picker_up(),
            KeyCode::Enter => self.apply_status_picker_selection(),
            _ => {}
        }
    }

    pub(in crate::tui) fn handle_status_picker_mouse(&mut self, event: &MouseEvent) {
        if self.click_outside.is_outside(event) {
            self.close_status_picker();
            return;
        }
        let Some(area) = self.click_outside.area() else {
            return;
        };
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        // Rows inside the border map onto options.
        let row = event.row.saturating_sub(area.y.saturating_add(1));
        if event.row > area.y && usize::from(row) < StatusFilter::ALL.len() {
            if let Some(picker) = &mut self.status_picker {
                picker.selected = usize::from(row);
            }
            self.apply_status_picker_selection();
        }
    }

    pub(in crate::tui) fn open_status_picker(&mut self) {
        self.status_picker = Some(StatusPickerState {
            selected: self.app.status_filter().position(),
        });
        self.focus = Focus::StatusPicker;
    }

    pub(in crate::tui) fn close_status_picker(&mut self) {
        self.status_picker = None;
        self.click_outside.release();
        self.focus = Focus::List;
    }

    fn status_picker_down(&mut self) {
        if let Some(picker) = &mut self.status_picker {
            picker.selected = (picker.selected + 1).min(StatusFilter::ALL.len() - 1);
        }
    }

    fn status_picker_up(&mut self) {
        if let Some(picker) = &mut self.status_picker {
            picker.selected = picker.selected.saturating_sub(1);
        }
    }

    fn apply_status_picker_selection(&mut self) {
        let Some(status) = self
            .status_picker
            .as_ref()
            .and_then(|picker| StatusFilter::ALL.get(picker.selected).copied())
        else {
            return;
        };
        self.app.set_status_filter(status);
        self.prefs.update(|prefs| {
            let mut prefs = prefs.clone();
            prefs.status = status;
            prefs
        });
        self.close_status_picker();
        self.info(format!("Showing {} tasks", status.label().to_lowercase()));
    }
}
