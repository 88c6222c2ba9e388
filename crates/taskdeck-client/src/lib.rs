//! Task API clients for taskdeck.
//!
//! The terminal UI treats the backend as an opaque collaborator returning
//! task records. [`HttpTaskApi`] talks to a JSON HTTP API and
//! [`FileTaskApi`] serves the same contract from a local JSON file.

mod error;
mod file;
mod http;
mod task;

use std::future::Future;

pub use error::{ClientError, Result};
pub use file::FileTaskApi;
pub use http::HttpTaskApi;
pub use task::{Task, TaskSummary};

/// Operations the front end needs from a task backend.
///
/// Returned futures are `Send` so they can be spawned on a multi-threaded
/// runtime.
pub trait TaskApi: Send + Sync {
    /// Fetch every task.
    ///
    /// # Errors
    /// Returns a client error when the backend cannot be reached or answers
    /// with an unexpected payload.
    fn list_tasks(&self) -> impl Future<Output = Result<Vec<Task>>> + Send;

    /// Fetch a single task.
    ///
    /// # Errors
    /// Returns [`ClientError::NotFound`] for unknown identifiers.
    fn get_task(&self, id: u64) -> impl Future<Output = Result<Task>> + Send;

    /// Mark a task as (not) completed and return the updated record.
    ///
    /// # Errors
    /// Returns [`ClientError::NotFound`] for unknown identifiers.
    fn set_completed(&self, id: u64, completed: bool) -> impl Future<Output = Result<Task>> + Send;
}

/// Backend selected at runtime.
#[derive(Debug, Clone)]
pub enum TaskClient {
    /// Remote JSON API.
    Http(HttpTaskApi),
    /// Local JSON file.
    File(FileTaskApi),
}

impl TaskClient {
    /// Short description of where tasks come from.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Http(api) => api.base_url().to_owned(),
            Self::File(api) => api.path().display().to_string(),
        }
    }
}

impl TaskApi for TaskClient {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        match self {
            Self::Http(api) => api.list_tasks().await,
            Self::File(api) => api.list_tasks().await,
        }
    }

    async fn get_task(&self, id: u64) -> Result<Task> {
        match self {
            Self::Http(api) => api.get_task(id).await,
            Self::File(api) => api.get_task(id).await,
        }
    }

    async fn set_completed(&self, id: u64, completed: bool) -> Result<Task> {
        match self {
            Self::Http(api) => api.set_completed(id, completed).await,
            Self::File(api) => api.set_completed(id, completed).await,
        }
    }
}
