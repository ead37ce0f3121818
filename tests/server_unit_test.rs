use ki_admin::server::run;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::{
    io::{self, Write},
    net::{Ipv4Addr, SocketAddr},
    time::Duration,
};
use tempfile::{tempdir, NamedTempFile};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

// Helper function to find an available port
async fn find_available_port() -> Option<u16> {
    use tokio::net::TcpListener;
    for port in 8000..9000 {
        match TcpListener::bind(SocketAddr::new(Ipv4Addr::LOCALHOST.into(), port)).await {
            Ok(listener) => {
                return Some(
                    listener
                        .local_addr()
                        .expect("Failed to get local address of listener")
                        .port(),
                )
            }
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                eprintln!(
                    "Skipping server integration test because binding to {port} failed: {err}"
                );
                return None;
            }
            Err(_) => {}
        }
    }
    panic!("No available port found");
}

#[tokio::test]
async fn test_server_serves_index_and_persists_selection() {
    let store_dir = tempdir().expect("Failed to create temp store directory");
    let store_file = store_dir.path().join("preferences.json5");

    // Create a temporary config file
    let mut config_file = NamedTempFile::new().expect("Failed to create temp config file");
    let test_config = json!({
        "site_name": "Test Dashboard",
        "namespace": "test-admin",
        "store_file": store_file,
    });
    config_file
        .write_all(test_config.to_string().as_bytes())
        .expect("Failed to write to temp config file");
    let config_path = config_file.path().to_path_buf();

    let Some(port) = find_available_port().await else {
        return;
    };
    let server_address = format!("http://127.0.0.1:{port}");
    let cancel_token = CancellationToken::new();

    // Spawn the server in a background task
    let server_handle = tokio::spawn({
        let cancel_token = cancel_token.clone();
        async move {
            run(port, Some(config_path), cancel_token)
                .await
                .expect("Server failed to start");
        }
    });

    // Give the server a moment to start up
    sleep(Duration::from_secs(1)).await;

    let client = reqwest::Client::new();
    let response = client
        .get(&server_address)
        .send()
        .await
        .expect("Failed to send request to server");
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.expect("Failed to read index body");
    assert!(html.contains("Test Dashboard"));
    assert!(html.contains(r#"text="medium-text""#));

    let response = client
        .post(format!("{server_address}/api/customizer/select"))
        .header("content-type", "application/json")
        .body(json!({"category": "sidebar-option", "value": "dark-sidebar"}).to_string())
        .send()
        .await
        .expect("Failed to send selection");
    assert_eq!(response.status(), StatusCode::OK);
    let outcome: Value =
        serde_json::from_str(&response.text().await.expect("Failed to read selection body"))
            .expect("Selection response is not JSON");
    assert_eq!(outcome["outcome"], "applied");

    let stored = std::fs::read_to_string(&store_file).expect("Preference file was not written");
    assert!(stored.contains("test-admin-sidebar-option"));

    // Trigger graceful shutdown
    cancel_token.cancel();

    // Wait for the server to shut down
    server_handle.await.expect("Server task failed");
}
