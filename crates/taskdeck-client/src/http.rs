//! HTTP implementation of the task API.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::task::{CompletionPatch, Task};
use crate::TaskApi;

/// Client for a JSON task API rooted at `base_url`.
///
/// Endpoints: `GET /tasks`, `GET /tasks/{id}`, `PATCH /tasks/{id}`.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    base_url: String,
    client: Client,
}

impl HttpTaskApi {
    /// Create a client for `base_url` (scheme must be `http` or `https`).
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUrl`] when the URL has no supported scheme.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client reusing an existing `reqwest` client.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidUrl`] when the URL has no supported scheme.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Result<Self> {
        let base_url = normalize_base_url(&base_url.into())?;
        Ok(Self { base_url, client })
    }

    /// Normalized base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: u64) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }
}

impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let url = self.tasks_url();
        debug!(%url, "listing tasks");
        let response = self.client.get(&url).send().await?;
        decode(response, None).await
    }

    async fn get_task(&self, id: u64) -> Result<Task> {
        let url = self.task_url(id);
        debug!(%url, "fetching task");
        let response = self.client.get(&url).send().await?;
        decode(response, Some(id)).await
    }

    async fn set_completed(&self, id: u64, completed: bool) -> Result<Task> {
        let url = self.task_url(id);
        debug!(%url, completed, "updating task");
        let response = self
            .client
            .patch(&url)
            .json(&CompletionPatch { completed })
            .send()
            .await?;
        decode(response, Some(id)).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, id: Option<u64>) -> Result<T> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND
        && let Some(id) = id
    {
        return Err(ClientError::NotFound(id));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());
    if has_host {
        Ok(trimmed.to_owned())
    } else {
        Err(ClientError::InvalidUrl(raw.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() -> Result<()> {
        let api = HttpTaskApi::new("http://localhost:3000/api/")?;
        assert_eq!(api.base_url(), "http://localhost:3000/api");
        assert_eq!(api.tasks_url(), "http://localhost:3000/api/tasks");
        assert_eq!(api.task_url(7), "http://localhost:3000/api/tasks/7");
        Ok(())
    }

    #[test]
    fn unsupported_schemes_are_rejected() {
        for raw in ["localhost:3000", "ftp://example.com", "https://", ""] {
            assert!(
                matches!(HttpTaskApi::new(raw), Err(ClientError::InvalidUrl(_))),
                "{raw} should be rejected"
            );
        }
    }
}
