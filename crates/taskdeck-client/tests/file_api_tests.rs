#![allow(missing_docs)]

use anyhow::Result;
use std::fs;
use taskdeck_client::{ClientError, FileTaskApi, Task, TaskApi, TaskClient};
use tempfile::tempdir;

fn seed() -> Vec<Task> {
    let mut done = Task::new(2, "Write docs");
    done.completed = true;
    vec![Task::new(1, "Test Task"), done]
}

#[tokio::test]
async fn missing_file_lists_no_tasks() -> Result<()> {
    let dir = tempdir()?;
    let api = FileTaskApi::new(dir.path().join("tasks.json"));
    assert!(api.list_tasks().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn saved_tasks_can_be_listed_and_fetched() -> Result<()> {
    let dir = tempdir()?;
    let api = FileTaskApi::new(dir.path().join("data/tasks.json"));
    api.save_all(seed()).await?;

    let tasks = api.list_tasks().await?;
    assert_eq!(tasks, seed());

    let task = api.get_task(1).await?;
    assert_eq!(task.title, "Test Task");
    Ok(())
}

#[tokio::test]
async fn unknown_task_is_not_found() -> Result<()> {
    let dir = tempdir()?;
    let api = FileTaskApi::new(dir.path().join("tasks.json"));
    api.save_all(seed()).await?;

    assert!(matches!(api.get_task(99).await, Err(ClientError::NotFound(99))));
    assert!(matches!(
        api.set_completed(99, true).await,
        Err(ClientError::NotFound(99))
    ));
    Ok(())
}

#[tokio::test]
async fn set_completed_persists_the_change() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("tasks.json");
    let api = FileTaskApi::new(&path);
    api.save_all(seed()).await?;

    let updated = api.set_completed(1, true).await?;
    assert!(updated.completed);

    let reopened = FileTaskApi::new(&path);
    assert!(reopened.get_task(1).await?.completed);
    assert!(reopened.set_completed(2, false).await.is_ok());
    assert!(!reopened.get_task(2).await?.completed);
    Ok(())
}

#[tokio::test]
async fn malformed_file_reports_parse_error() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("tasks.json");
    fs::write(&path, "{\"id\": 1}")?;
    let client = TaskClient::File(FileTaskApi::new(&path));

    let err = client.list_tasks().await.err();
    assert!(matches!(err, Some(ClientError::Json(_))));
    assert!(client.describe().ends_with("tasks.json"));
    Ok(())
}

#[tokio::test]
async fn concurrent_updates_are_not_lost() -> Result<()> {
    let dir = tempdir()?;
    let api = FileTaskApi::new(dir.path().join("tasks.json"));
    api.save_all((1..=8).map(|id| Task::new(id, format!("task {id}"))).collect())
        .await?;

    let mut handles = Vec::new();
    for id in 1..=8 {
        let api = api.clone();
        handles.push(tokio::spawn(async move { api.set_completed(id, true).await }));
    }
    for handle in handles {
        handle.await??;
    }

    let tasks = api.list_tasks().await?;
    assert!(tasks.iter().all(|task| task.completed));
    Ok(())
}
