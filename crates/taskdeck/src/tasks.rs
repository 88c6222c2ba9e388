//! Async operations over the task API shared by the CLI and the TUI.

use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use taskdeck_client::{Task, TaskApi, TaskClient};
use taskdeck_hooks::{AsyncOperation, ErrorPolicy, OperationOptions};

use crate::config::FetchConfig;

/// Fetches the whole task list.
pub type TaskListOperation = AsyncOperation<(), Vec<Task>>;
/// Fetches one task by id.
pub type TaskLookupOperation = AsyncOperation<u64, Task>;
/// Marks a task as (not) completed.
pub type CompletionOperation = AsyncOperation<(u64, bool), Task>;

/// Options derived from the `[fetch]` section.
pub fn fetch_options<T>(fetch: &FetchConfig) -> OperationOptions<T> {
    OperationOptions::default()
        .retry(fetch.retry_count, fetch.retry_delay())
        .auto_retry(fetch.auto_retry)
        .error_policy(ErrorPolicy::KeepData)
}

pub fn list_operation(client: &Arc<TaskClient>, options: OperationOptions<Vec<Task>>) -> TaskListOperation {
    let client = Arc::clone(client);
    AsyncOperation::new(
        move |(): ()| {
            let client = Arc::clone(&client);
            async move { client.list_tasks().await }
        },
        options,
    )
}

pub fn lookup_operation(client: &Arc<TaskClient>, options: OperationOptions<Task>) -> TaskLookupOperation {
    let client = Arc::clone(client);
    AsyncOperation::new(
        move |id: u64| {
            let client = Arc::clone(&client);
            async move { client.get_task(id).await }
        },
        options,
    )
}

pub fn completion_operation(
    client: &Arc<TaskClient>,
    options: OperationOptions<Task>,
) -> CompletionOperation {
    let client = Arc::clone(client);
    AsyncOperation::new(
        move |(id, completed): (u64, bool)| {
            let client = Arc::clone(&client);
            async move { client.set_completed(id, completed).await }
        },
        options,
    )
}

/// Which tasks to show by completion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Done,
}

impl StatusFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Open, Self::Done];

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Open => "Open",
            Self::Done => "Done",
        }
    }

    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Open => !task.completed,
            Self::Done => task.completed,
        }
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|filter| *filter == self).unwrap_or_default()
    }
}

/// Tasks matching `status` whose title or description contains `text`
/// (case-insensitive). Blank text matches everything.
pub fn filter_tasks<'a>(tasks: &'a [Task], status: StatusFilter, text: &str) -> Vec<&'a Task> {
    let needle = text.trim().to_lowercase();
    tasks
        .iter()
        .filter(|task| status.matches(task))
        .filter(|task| {
            needle.is_empty()
                || task.title.to_lowercase().contains(&needle)
                || task
                    .description
                    .as_deref()
                    .is_some_and(|description| description.to_lowercase().contains(&needle))
        })
        .collect()
}
