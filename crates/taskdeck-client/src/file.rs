//! JSON-file implementation of the task API.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::task::Task;
use crate::TaskApi;

/// Task API backed by a JSON array on disk.
///
/// A missing file reads as an empty list. Updates are serialized so that
/// concurrent read-modify-write cycles do not lose writes.
#[derive(Debug, Clone)]
pub struct FileTaskApi {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileTaskApi {
    /// Use `path` as the task file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the whole file with `tasks`.
    ///
    /// # Errors
    /// Returns an error when the file cannot be written.
    pub async fn save_all(&self, tasks: Vec<Task>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        run_blocking(move || write_tasks(&path, &tasks)).await
    }

    async fn load_all(&self) -> Result<Vec<Task>> {
        let path = self.path.clone();
        run_blocking(move || read_tasks(&path)).await
    }
}

impl TaskApi for FileTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        debug!(path = %self.path.display(), "listing tasks from file");
        self.load_all().await
    }

    async fn get_task(&self, id: u64) -> Result<Task> {
        self.load_all()
            .await?
            .into_iter()
            .find(|task| task.id == id)
            .ok_or(ClientError::NotFound(id))
    }

    async fn set_completed(&self, id: u64, completed: bool) -> Result<Task> {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        run_blocking(move || {
            let mut tasks = read_tasks(&path)?;
            let task = tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or(ClientError::NotFound(id))?;
            task.completed = completed;
            let updated = task.clone();
            write_tasks(&path, &tasks)?;
            Ok(updated)
        })
        .await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ClientError::Other(format!("Task join error: {e}")))?
}

fn read_tasks(path: &Path) -> Result<Vec<Task>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&contents)?)
}

fn write_tasks(path: &Path, tasks: &[Task]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(tasks)?;
    fs::write(path, contents)?;
    Ok(())
}
