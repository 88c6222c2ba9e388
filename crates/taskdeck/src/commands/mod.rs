use std::io::Write;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use taskdeck_client::{Task, TaskClient, TaskSummary};
use taskdeck_hooks::AsyncOperation;
use time::format_description::well_known::Rfc3339;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::FetchConfig;
use crate::tasks::{self, StatusFilter, filter_tasks, fetch_options};
use crate::{Command, DEFAULT_WATCH_INTERVAL, LsFormat};

/// Service façade running one-shot task operations for the CLI.
pub struct TaskService {
    client: Arc<TaskClient>,
    fetch: FetchConfig,
}

impl TaskService {
    pub const fn new(client: Arc<TaskClient>, fetch: FetchConfig) -> Self {
        Self { client, fetch }
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let operation = tasks::list_operation(&self.client, fetch_options(&self.fetch));
        let tasks = operation.execute(()).await;
        settled(&operation, tasks)
    }

    async fn show(&self, id: u64) -> Result<Task> {
        let operation = tasks::lookup_operation(&self.client, fetch_options(&self.fetch));
        let task = operation.execute(id).await;
        settled(&operation, task)
    }

    async fn set_completed(&self, id: u64, completed: bool) -> Result<Task> {
        let operation = tasks::completion_operation(&self.client, fetch_options(&self.fetch));
        let task = operation.execute((id, completed)).await;
        settled(&operation, task)
    }

    fn watch_interval(&self, interval_secs: Option<u64>) -> Duration {
        interval_secs
            .map(Duration::from_secs)
            .or_else(|| self.fetch.poll_interval())
            .unwrap_or(DEFAULT_WATCH_INTERVAL)
    }

    async fn watch(&self, interval: Duration, limit: Option<NonZeroUsize>, out: &mut impl Write) -> Result<()> {
        let (tx, mut refreshes) = mpsc::unbounded_channel();
        let failures = tx.clone();
        let options = fetch_options(&self.fetch)
            .on_success(move |tasks: &Vec<Task>| {
                let _ = tx.send(Ok(TaskSummary::of(tasks)));
            })
            .on_error(move |err| {
                let _ = failures.send(Err(err.message().to_owned()));
            });
        let operation = tasks::list_operation(&self.client, options);

        info!(source = %self.client.describe(), ?interval, "watching tasks");
        let poller = operation.poll_every(interval, ());
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        let mut count = 0_usize;
        loop {
            tokio::select! {
                refresh = refreshes.recv() => {
                    let Some(refresh) = refresh else { break };
                    count += 1;
                    write_refresh_line(out, count, &refresh)?;
                    if limit.is_some_and(|limit| count >= limit.get()) {
                        break;
                    }
                }
                _ = &mut shutdown => break,
            }
        }

        poller.stop();
        Ok(())
    }
}

/// Turn an operation's outcome into a `Result`, using the stored error message.
fn settled<A, T>(operation: &AsyncOperation<A, T>, value: Option<T>) -> Result<T>
where
    A: Clone + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    value.ok_or_else(|| {
        let state = operation.snapshot();
        let message = state.error_message().unwrap_or("request failed");
        warn!(error = message, "task request failed");
        anyhow!("{message}")
    })
}

pub async fn run(command: Command, service: &TaskService, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Ls { status, format } => {
            let tasks = service.list().await?;
            let visible = filter_tasks(&tasks, status, "");

            if visible.is_empty() {
                if status == StatusFilter::All {
                    writeln!(out, "No tasks found")?;
                } else {
                    writeln!(out, "No {} tasks", status.label().to_lowercase())?;
                }
                return Ok(());
            }

            match format {
                LsFormat::Table => render_task_table(out, &visible)?,
                LsFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&visible)?)?,
            }
        }
        Command::Show { task } => {
            let task = service.show(task).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&task)?)?;
        }
        Command::Done { task, undo } => {
            let updated = service.set_completed(task, !undo).await?;
            if updated.completed {
                writeln!(out, "marked task {} as done: {}", updated.id, updated.title)?;
            } else {
                writeln!(out, "reopened task {}: {}", updated.id, updated.title)?;
            }
        }
        Command::Watch { interval_secs, limit } => {
            let interval = service.watch_interval(interval_secs);
            service.watch(interval, limit, out).await?;
        }
        Command::Tui => unreachable!("Unhandled command routed to TaskService"),
    }

    Ok(())
}

fn render_task_table(out: &mut impl Write, tasks: &[&Task]) -> Result<()> {
    writeln!(out, "ID | Status | Title | Created")?;
    writeln!(out, "-- | ------ | ----- | -------")?;

    for task in tasks {
        let created = task
            .created_at
            .and_then(|at| at.format(&Rfc3339).ok())
            .unwrap_or_else(|| "-".to_owned());
        writeln!(
            out,
            "{} | {} | {} | {}",
            task.id,
            task.status_label(),
            task.title,
            created
        )?;
    }
    Ok(())
}

fn write_refresh_line(
    out: &mut impl Write,
    count: usize,
    refresh: &std::result::Result<TaskSummary, String>,
) -> Result<()> {
    match refresh {
        Ok(summary) => writeln!(
            out,
            "refresh #{count}: {} tasks ({} done, {} open)",
            summary.total,
            summary.completed,
            summary.open()
        )?,
        Err(message) => writeln!(out, "refresh #{count} failed: {message}")?,
    }
    out.flush()?;
    Ok(())
}
