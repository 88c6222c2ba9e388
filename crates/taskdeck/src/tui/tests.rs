use std::fmt::Display;
use std::path::PathBuf;
use std::result::Result as StdResult;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::TestBackend};
use taskdeck_client::{FileTaskApi, Task, TaskApi, TaskClient};
use taskdeck_hooks::LocalStore;
use tempfile::{TempDir, tempdir};

use super::app::App;
use super::constants::PREFS_KEY;
use super::view::{Focus, MessageLevel, Ui, UiPrefs};
use crate::config::FetchConfig;
use crate::tasks::StatusFilter;

const DEBOUNCE: Duration = Duration::from_millis(300);

fn expect_ok<T, E: Display>(result: StdResult<T, E>, ctx: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{ctx}: {err}"),
    }
}

fn expect_some<T>(value: Option<T>, ctx: &str) -> T {
    value.map_or_else(|| panic!("{ctx}"), |inner| inner)
}

fn seed() -> Vec<Task> {
    let mut docs = Task::new(2, "Write docs");
    docs.completed = true;
    docs.description = Some("Document the API".into());
    vec![Task::new(1, "Test Task"), docs]
}

fn no_retries() -> FetchConfig {
    FetchConfig {
        retry_count: 0,
        ..FetchConfig::default()
    }
}

struct Harness {
    ui: Ui,
    api: FileTaskApi,
    dir: TempDir,
}

impl Harness {
    async fn with_tasks(tasks: Vec<Task>, fetch: &FetchConfig) -> Self {
        let dir = expect_ok(tempdir(), "create tempdir");
        let api = FileTaskApi::new(dir.path().join("tasks.json"));
        expect_ok(api.save_all(tasks).await, "seed tasks");
        Self::open(dir, api, fetch)
    }

    fn open(dir: TempDir, api: FileTaskApi, fetch: &FetchConfig) -> Self {
        let client = Arc::new(TaskClient::File(api.clone()));
        let app = App::new(&client, fetch);
        let ui = Ui::new(app, LocalStore::new(prefs_path(&dir)), DEBOUNCE);
        Self { ui, api, dir }
    }

    fn press(&mut self, code: KeyCode) {
        self.ui.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn click(&mut self, column: u16, row: u16) {
        self.ui.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Tick until `done` holds, yielding to background requests in between.
    async fn wait_for(&mut self, ctx: &str, done: impl Fn(&Ui) -> bool) {
        for _ in 0..400 {
            self.ui.tick(Instant::now());
            if done(&self.ui) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("timed out waiting for {ctx}");
    }

    async fn loaded(&mut self) {
        self.wait_for("task list", |ui| {
            let state = ui.app.list_state();
            !state.loading && (state.data.is_some() || state.error.is_some())
        })
        .await;
    }

    fn render(&mut self) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = expect_ok(Terminal::new(backend), "create terminal");
        expect_ok(terminal.draw(|f| self.ui.draw(f)), "draw frame");
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn message(&self) -> Option<(MessageLevel, String)> {
        self.ui
            .message
            .as_ref()
            .map(|msg| (msg.level, msg.text.clone()))
    }
}

fn prefs_path(dir: &TempDir) -> PathBuf {
    dir.path().join("state.json")
}

fn visible_ids(ui: &Ui) -> Vec<u64> {
    ui.app.visible_tasks().into_iter().map(|task| task.id).collect()
}

#[tokio::test]
async fn loads_tasks_on_start() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;

    assert_eq!(visible_ids(&h.ui), vec![1, 2]);
    assert_eq!(expect_some(h.ui.app.selected_task(), "selection").title, "Test Task");
    assert!(!h.ui.app.is_polling());
}

#[tokio::test]
async fn polling_loads_tasks_and_reports_polling() {
    let fetch = FetchConfig {
        poll_interval_secs: 60,
        ..no_retries()
    };
    let mut h = Harness::with_tasks(seed(), &fetch).await;
    h.loaded().await;

    assert_eq!(h.ui.app.tasks().len(), 2);
    assert!(h.ui.app.is_polling());
    assert!(h.render().contains("polling"));
}

#[tokio::test]
async fn renders_list_details_and_progress() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;

    let screen = h.render();
    assert!(screen.contains("Tasks (2/2)"));
    assert!(screen.contains("Test Task"));
    assert!(screen.contains("Status: open"));
    assert!(screen.contains("1/2 done"));
    assert!(screen.contains("Ready"));
}

#[tokio::test]
async fn filter_text_applies_after_debounce() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;

    h.press(KeyCode::Char('/'));
    assert_eq!(h.ui.focus, Focus::Filter);
    for c in "docs".chars() {
        h.press(KeyCode::Char(c));
    }

    h.ui.tick(Instant::now());
    assert_eq!(visible_ids(&h.ui), vec![1, 2]);
    assert!(h.ui.filter_input.is_pending());

    h.ui.tick(Instant::now() + DEBOUNCE);
    assert_eq!(visible_ids(&h.ui), vec![2]);
    assert_eq!(h.ui.app.text_filter(), "docs");
}

#[tokio::test]
async fn enter_applies_filter_and_esc_clears_it() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;

    h.press(KeyCode::Char('/'));
    for c in "tex".chars() {
        h.press(KeyCode::Char(c));
    }
    h.press(KeyCode::Backspace);
    h.press(KeyCode::Char('s'));
    h.press(KeyCode::Enter);
    assert_eq!(h.ui.focus, Focus::List);
    assert_eq!(h.ui.app.text_filter(), "tes");
    assert_eq!(visible_ids(&h.ui), vec![1]);

    h.press(KeyCode::Esc);
    assert_eq!(h.ui.app.text_filter(), "");
    assert_eq!(visible_ids(&h.ui), vec![1, 2]);
}

#[tokio::test]
async fn navigation_stays_in_bounds() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;

    h.press(KeyCode::Char('k'));
    assert_eq!(h.ui.app.selected_index(), 0);
    h.press(KeyCode::Char('j'));
    h.press(KeyCode::Down);
    assert_eq!(h.ui.app.selected_index(), 1);
}

#[tokio::test]
async fn toggle_updates_optimistically_and_persists() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;

    h.press(KeyCode::Char(' '));
    assert!(h.ui.app.tasks()[0].completed);
    assert_eq!(h.ui.app.summary().completed, 2);

    h.wait_for("completion notice", |ui| {
        ui.message
            .as_ref()
            .is_some_and(|msg| msg.text == "Completed: Test Task")
    })
    .await;
    assert!(expect_ok(h.api.get_task(1).await, "read task").completed);
}

#[tokio::test]
async fn failed_toggle_reloads_from_backend() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;

    let remaining = seed().into_iter().filter(|task| task.id != 1).collect();
    expect_ok(h.api.save_all(remaining).await, "drop task 1");

    h.press(KeyCode::Char(' '));
    h.wait_for("reload after failure", |ui| {
        !ui.app.is_busy() && ui.app.tasks().iter().all(|task| task.id != 1)
    })
    .await;
    assert_eq!(
        h.message(),
        Some((MessageLevel::Error, "Failed to update task: Task not found: 1".into()))
    );
}

#[tokio::test]
async fn load_failure_shows_alert() {
    let dir = expect_ok(tempdir(), "create tempdir");
    let path = dir.path().join("tasks.json");
    expect_ok(std::fs::write(&path, "not json"), "write malformed file");
    let mut h = Harness::open(dir, FileTaskApi::new(&path), &no_retries());
    h.loaded().await;

    let (level, text) = expect_some(h.message(), "alert");
    assert_eq!(level, MessageLevel::Error);
    assert!(text.starts_with("Failed to load tasks: Failed to parse tasks"));
    let screen = h.render();
    assert!(screen.contains("Could not load tasks"));
    assert!(screen.contains("Error"));
}

#[tokio::test]
async fn retry_key_reloads_after_failure() {
    let dir = expect_ok(tempdir(), "create tempdir");
    let path = dir.path().join("tasks.json");
    expect_ok(std::fs::write(&path, "not json"), "write malformed file");
    let fetch = FetchConfig {
        retry_count: 1,
        retry_delay_ms: 0,
        ..FetchConfig::default()
    };
    let mut h = Harness::open(dir, FileTaskApi::new(&path), &fetch);
    h.loaded().await;
    assert!(h.ui.app.list_state().error.is_some());

    expect_ok(h.api.save_all(seed()).await, "repair file");
    h.press(KeyCode::Char('R'));
    assert_eq!(h.message(), Some((MessageLevel::Info, "Retrying last request".into())));
    h.wait_for("retry", |ui| ui.app.tasks().len() == 2).await;
    assert!(h.ui.app.list_state().error.is_none());

    h.press(KeyCode::Char('R'));
    assert_eq!(h.message(), Some((MessageLevel::Error, "Nothing to retry".into())));
}

#[tokio::test]
async fn reset_clears_loaded_tasks() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;

    h.press(KeyCode::Char('z'));
    assert!(h.ui.app.list_state().is_initial());
    assert!(h.ui.app.tasks().is_empty());
    assert!(h.render().contains("No tasks"));

    h.press(KeyCode::Char('r'));
    h.wait_for("refresh", |ui| ui.app.tasks().len() == 2).await;
}

#[tokio::test]
async fn retry_after_reset_has_nothing_to_retry() {
    let mut h = Harness::with_tasks(seed(), &FetchConfig::default()).await;
    h.loaded().await;

    h.press(KeyCode::Char('z'));
    h.press(KeyCode::Char('R'));
    assert_eq!(h.message(), Some((MessageLevel::Error, "Nothing to retry".into())));
    assert!(h.ui.app.list_state().is_initial());
}

#[tokio::test]
async fn status_picker_filters_and_persists() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;

    h.press(KeyCode::Char('s'));
    assert_eq!(h.ui.focus, Focus::StatusPicker);
    h.press(KeyCode::Char('j'));
    h.press(KeyCode::Enter);

    assert_eq!(h.ui.focus, Focus::List);
    assert_eq!(h.ui.app.status_filter(), StatusFilter::Open);
    assert_eq!(visible_ids(&h.ui), vec![1]);

    let stored: Option<UiPrefs> =
        expect_ok(LocalStore::new(prefs_path(&h.dir)).get(PREFS_KEY), "read prefs");
    assert_eq!(expect_some(stored, "stored prefs").status, StatusFilter::Open);

    let Harness { dir, api, .. } = h;
    let reopened = Harness::open(dir, api, &no_retries());
    assert_eq!(reopened.ui.app.status_filter(), StatusFilter::Open);
}

#[tokio::test]
async fn click_outside_closes_dropdown() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;

    h.press(KeyCode::Char('s'));
    h.render();
    assert!(h.ui.click_outside.area().is_some());

    h.click(0, 20);
    assert!(h.ui.status_picker.is_none());
    assert_eq!(h.ui.focus, Focus::List);
    assert_eq!(h.ui.app.status_filter(), StatusFilter::All);
    h.render();
    assert_eq!(h.ui.click_outside.area(), None);
}

#[tokio::test]
async fn clicking_an_option_selects_it() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;

    h.press(KeyCode::Char('s'));
    h.render();
    let area = expect_some(h.ui.click_outside.area(), "dropdown area");

    h.click(area.x + 1, area.y + 3);
    assert!(h.ui.status_picker.is_none());
    assert_eq!(h.ui.app.status_filter(), StatusFilter::Done);
    assert_eq!(visible_ids(&h.ui), vec![2]);
}

#[tokio::test]
async fn escape_closes_dropdown_without_change() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;

    h.press(KeyCode::Char('s'));
    h.press(KeyCode::Char('j'));
    h.press(KeyCode::Esc);
    assert!(h.ui.status_picker.is_none());
    assert_eq!(h.ui.app.status_filter(), StatusFilter::All);
}

#[tokio::test]
async fn details_toggle_is_persisted() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.loaded().await;
    assert!(h.ui.show_details.get());

    h.press(KeyCode::Char('d'));
    assert!(!h.ui.show_details.get());
    assert!(!h.render().contains("Details"));

    let Harness { dir, api, .. } = h;
    let reopened = Harness::open(dir, api, &no_retries());
    assert!(!reopened.ui.show_details.get());
}

#[tokio::test]
async fn quit_keys_stop_the_loop() {
    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.press(KeyCode::Char('q'));
    assert!(h.ui.should_quit);

    let mut h = Harness::with_tasks(seed(), &no_retries()).await;
    h.ui.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(h.ui.should_quit);
}
