use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
};
use serde::{Deserialize, Serialize};
use taskdeck_hooks::{Debounce, LocalStore, Persisted, Toggle};

use super::app::{App, Notice};
use super::constants::{PREFS_KEY, SPINNER_FRAMES, STATUS_DROPDOWN_WIDTH, TASK_LIST_PERCENT, UI_MESSAGE_TTL_SECS};
use super::outside::ClickOutside;
use crate::tasks::StatusFilter;

/// Preferences kept across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct UiPrefs {
    pub(super) status: StatusFilter,
    pub(super) show_details: bool,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            show_details: true,
        }
    }
}

pub(super) struct StatusPickerState {
    pub(super) selected: usize,
}

/// Which component receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Focus {
    /// Browsing the task list.
    List,
    /// Typing into the filter input.
    Filter,
    /// Status filter dropdown is open.
    StatusPicker,
}

pub(super) struct Ui {
    pub(super) app: App,
    pub(super) message: Option<Message>,
    pub(super) should_quit: bool,
    pub(super) focus: Focus,
    /// Raw filter text; the app only sees settled values.
    pub(super) filter_input: Debounce<String>,
    pub(super) prefs: Persisted<UiPrefs>,
    pub(super) show_details: Toggle,
    pub(super) status_picker: Option<StatusPickerState>,
    pub(super) click_outside: ClickOutside,
    pub(super) spinner_frame: usize,
}

impl Ui {
    pub(super) const FILTER_HEIGHT: u16 = 3;
    pub(super) const MAIN_MIN_HEIGHT: u16 = 5;
    pub(super) const PROGRESS_HEIGHT: u16 = 3;
    pub(super) const STATUS_HEIGHT: u16 = 3;
    pub(super) const FOOTER_HEIGHT: u16 = 1;

    pub(super) fn new(mut app: App, store: LocalStore, debounce: Duration) -> Self {
        let prefs = Persisted::load(store, PREFS_KEY, UiPrefs::default());
        app.set_status_filter(prefs.get().status);
        let show_details = Toggle::new(prefs.get().show_details);
        Self {
            app,
            message: None,
            should_quit: false,
            focus: Focus::List,
            filter_input: Debounce::new(String::new(), debounce),
            prefs,
            show_details,
            status_picker: None,
            click_outside: ClickOutside::default(),
            spinner_frame: 0,
        }
    }

    pub(super) fn draw(&mut self, f: &mut Frame<'_>) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(Self::layout_constraints())
            .split(f.area());

        self.draw_filter_bar(f, rows[0]);
        self.draw_main(f, rows[1]);
        self.draw_progress(f, rows[2]);
        self.draw_alert(f, rows[3]);
        self.draw_key_hints(f, rows[4]);

        if self.status_picker.is_some() {
            let area = Self::status_dropdown_area(rows[0]).intersection(f.area());
            self.click_outside.track(area);
            self.draw_status_dropdown(f, area);
        } else {
            self.click_outside.release();
        }
    }

    pub(super) const fn layout_constraints() -> [Constraint; 5] {
        [
            Constraint::Length(Self::FILTER_HEIGHT),
            Constraint::Min(Self::MAIN_MIN_HEIGHT),
            Constraint::Length(Self::PROGRESS_HEIGHT),
            Constraint::Length(Self::STATUS_HEIGHT),
            Constraint::Length(Self::FOOTER_HEIGHT),
        ]
    }

    fn draw_main(&self, f: &mut Frame<'_>, area: Rect) {
        if !self.show_details.get() {
            self.draw_task_list(f, area);
            return;
        }
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(TASK_LIST_PERCENT),
                Constraint::Percentage(100 - TASK_LIST_PERCENT),
            ])
            .split(area);
        self.draw_task_list(f, columns[0]);
        self.draw_detail(f, columns[1]);
    }

    /// Dropdown hanging below the right end of the filter bar.
    pub(super) fn status_dropdown_area(anchor: Rect) -> Rect {
        let options = u16::try_from(StatusFilter::ALL.len()).unwrap_or(u16::MAX);
        let width = STATUS_DROPDOWN_WIDTH.min(anchor.width);
        Rect {
            x: anchor.right().saturating_sub(width),
            y: anchor.bottom(),
            width,
            height: options.saturating_add(2),
        }
    }

    pub(super) fn info(&mut self, message: impl Into<String>) {
        self.message = Some(Message::info(message));
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.message = Some(Message::error(message));
    }

    pub(super) fn tick(&mut self, now: Instant) {
        if let Some(msg) = &self.message
            && msg.is_expired(Duration::from_secs(UI_MESSAGE_TTL_SECS))
        {
            self.message = None;
        }

        if let Some(text) = self.filter_input.poll(now) {
            let text = text.clone();
            self.app.set_text_filter(&text);
        }

        for notice in self.app.sync() {
            match notice {
                Notice::ListFailed(message) => self.error(format!("Failed to load tasks: {message}")),
                Notice::CompletionFailed(message) => {
                    self.error(format!("Failed to update task: {message}"));
                }
                Notice::Completed(task) => {
                    let verb = if task.completed { "Completed" } else { "Reopened" };
                    self.info(format!("{verb}: {}", task.title));
                }
            }
        }

        if self.app.is_busy() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }
}

pub(super) struct Message {
    pub(super) text: String,
    pub(super) level: MessageLevel,
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageLevel {
    Info,
    Error,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
            created_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub(super) fn style(&self) -> Style {
        match self.level {
            MessageLevel::Info => Style::default().fg(Color::Green),
            MessageLevel::Error => Style::default().fg(Color::Red),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
