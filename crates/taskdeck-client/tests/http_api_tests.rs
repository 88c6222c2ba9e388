#![allow(missing_docs)]

use anyhow::Result;
use taskdeck_client::{ClientError, HttpTaskApi, TaskApi};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve a single canned HTTP response and hand back the raw request.
async fn serve_once(status: &str, body: &str) -> Result<(String, JoinHandle<Result<String>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        let request = read_request(&mut socket).await?;
        socket.write_all(response.as_bytes()).await?;
        socket.shutdown().await?;
        Ok(request)
    });
    Ok((base_url, handle))
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Result<String> {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[tokio::test]
async fn list_tasks_decodes_records() -> Result<()> {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"[{"id":1,"title":"Test Task"},{"id":2,"title":"Done","completed":true}]"#,
    )
    .await?;
    let api = HttpTaskApi::new(base_url)?;

    let tasks = api.list_tasks().await?;

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "Test Task");
    assert!(tasks[1].completed);
    let request = server.await??;
    assert!(request.starts_with("GET /tasks HTTP/1.1"));
    Ok(())
}

#[tokio::test]
async fn missing_task_maps_to_not_found() -> Result<()> {
    let (base_url, server) = serve_once("404 Not Found", "{}").await?;
    let api = HttpTaskApi::new(base_url)?;

    let result = api.get_task(42).await;

    assert!(matches!(result, Err(ClientError::NotFound(42))));
    let request = server.await??;
    assert!(request.starts_with("GET /tasks/42 HTTP/1.1"));
    Ok(())
}

#[tokio::test]
async fn server_errors_keep_status_and_body() -> Result<()> {
    let (base_url, server) = serve_once("500 Internal Server Error", r#"{"error":"API Error"}"#).await?;
    let api = HttpTaskApi::new(base_url)?;

    match api.list_tasks().await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("API Error"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    server.await??;
    Ok(())
}

#[tokio::test]
async fn set_completed_sends_patch_body() -> Result<()> {
    let (base_url, server) =
        serve_once("200 OK", r#"{"id":3,"title":"Ship it","completed":true}"#).await?;
    let api = HttpTaskApi::new(format!("{base_url}/"))?;

    let task = api.set_completed(3, true).await?;

    assert!(task.completed);
    let request = server.await??;
    assert!(request.starts_with("PATCH /tasks/3 HTTP/1.1"));
    assert!(request.ends_with(r#"{"completed":true}"#));
    Ok(())
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    drop(listener);

    let api = HttpTaskApi::new(base_url)?;
    assert!(matches!(api.list_tasks().await, Err(ClientError::Http(_))));
    Ok(())
}
