use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use taskdeck_client::TaskClient;
use taskdeck_hooks::LocalStore;
use tokio::runtime::Runtime;
use tracing::subscriber::NoSubscriber;

use crate::config::ProjectConfig;

mod app;
pub mod constants;
mod handlers;
mod outside;
mod view;
mod widgets;

#[cfg(test)]
mod tests;

use self::app::App;
use self::constants::TUI_TICK_RATE_MS;
use self::view::Ui;

/// Launch the interactive TUI.
///
/// Background requests run on `runtime` while the terminal loop blocks the
/// calling thread.
pub fn run(runtime: &Runtime, client: Arc<TaskClient>, config: &ProjectConfig) -> Result<()> {
    let _guard = runtime.enter();

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = tracing::subscriber::with_default(NoSubscriber::default(), || {
        run_event_loop(&mut terminal, &client, config)
    });

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    client: &Arc<TaskClient>,
    config: &ProjectConfig,
) -> Result<()> {
    let app = App::new(client, &config.fetch);
    let mut ui = Ui::new(app, LocalStore::new(config.state_file()), config.ui.debounce());

    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(TUI_TICK_RATE_MS);

    loop {
        terminal.draw(|f| ui.draw(f))?;
        if ui.should_quit {
            break;
        }

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();

        if event::poll(timeout)? {
            match event::read()? {
                CrosstermEvent::Key(key) => ui.handle_key(key),
                CrosstermEvent::Mouse(mouse) => ui.handle_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            ui.tick(Instant::now());
            last_tick = Instant::now();
        }
    }

    Ok(())
}
