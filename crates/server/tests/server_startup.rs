use std::io::Write;
use std::net::TcpListener;
use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use serde_json::json;
use tempfile::NamedTempFile;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a minimal valid config
fn minimal_config(port: u16) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = {}
"#,
        port
    )
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Spawn the server and return a handle
async fn spawn_server(config_path: &std::path::Path) -> tokio::process::Child {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_helpdesk"))
        .env("HELPDESK_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/api/v1/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

#[tokio::test]
async fn test_health_endpoint() {
    let port = get_available_port();
    let temp_file = write_config(&minimal_config(port));

    let mut server = spawn_server(temp_file.path()).await;
    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/api/v1/health", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["status"], "ok");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_starts_with_seed_tickets() {
    let port = get_available_port();
    let temp_file = write_config(&minimal_config(port));

    let mut server = spawn_server(temp_file.path()).await;
    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/api/v1/tickets", port))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let json: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(json["total"], 3);
    assert_eq!(json["tickets"][0]["title"], "Mobile Dev");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_unseeded_store_starts_empty() {
    let port = get_available_port();
    let config = format!("{}\n[store]\nseed = false\n", minimal_config(port));
    let temp_file = write_config(&config);

    let mut server = spawn_server(temp_file.path()).await;
    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let json: serde_json::Value = Client::new()
        .get(format!("http://127.0.0.1:{}/api/v1/config", port))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(json["store"]["seed"], false);
    assert_eq!(json["server"]["port"], port);

    let json: serde_json::Value = Client::new()
        .get(format!("http://127.0.0.1:{}/api/v1/tickets", port))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(json["total"], 0);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_change_feed_delivers_ticket_updates() {
    let port = get_available_port();
    let temp_file = write_config(&minimal_config(port));

    let mut server = spawn_server(temp_file.path()).await;
    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    let (ws_stream, _) = connect_async(format!("ws://127.0.0.1:{}/api/v1/ws", port))
        .await
        .expect("Failed to connect to WebSocket");
    let (_write, mut read) = ws_stream.split();

    // The socket subscribes after the handshake completes, so keep editing
    // until an update arrives
    let client = Client::new();
    let received = timeout(Duration::from_secs(10), async {
        loop {
            let response = client
                .put(format!("http://127.0.0.1:{}/api/v1/tickets/2", port))
                .json(&json!({
                    "title": "Web technology",
                    "description": "Angular",
                    "status": "Completed"
                }))
                .send()
                .await
                .expect("Failed to send request");
            assert!(response.status().is_success());

            let next = timeout(Duration::from_millis(250), read.next()).await;
            if let Ok(Some(Ok(Message::Text(text)))) = next {
                let data: serde_json::Value =
                    serde_json::from_str(&text).expect("Failed to parse message");
                if data["type"] == "ticket_update" {
                    return data;
                }
            }
        }
    })
    .await
    .expect("No ticket_update received");

    assert_eq!(received["ticket_id"], "2");
    assert_eq!(received["status"], "Completed");

    server.kill().await.ok();
}

#[tokio::test]
async fn test_missing_config_file_exits_with_error() {
    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_helpdesk"))
            .env("HELPDESK_CONFIG", "/nonexistent/config.toml")
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_invalid_config_exits_with_error() {
    let temp_file = write_config(
        r#"
[ws]
channel_capacity = 0
"#,
    );

    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_helpdesk"))
            .env("HELPDESK_CONFIG", temp_file.path())
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}
