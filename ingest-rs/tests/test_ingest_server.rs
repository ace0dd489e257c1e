use ingest_rs::{spawn_server, AppendLog, IngestConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

fn temp_config() -> IngestConfig {
    IngestConfig {
        bind: "127.0.0.1:0".to_string(),
        log_path: std::env::temp_dir().join(format!("ingest-{}.ndjson", uuid::Uuid::new_v4())),
    }
}

fn stop_signal() -> (Arc<Notify>, impl std::future::Future<Output = ()> + Send + 'static) {
    let notify = Arc::new(Notify::new());
    let waiter = notify.clone();
    (notify, async move { waiter.notified().await })
}

#[tokio::test]
async fn test_concurrent_devices_all_logged() {
    let config = temp_config();
    let log_path = config.log_path.clone();
    let (stop, shutdown) = stop_signal();
    let (addr, server) = spawn_server(config, shutdown).await.unwrap();
    let url = format!("http://{}/sensordata", addr);
    let client = reqwest::Client::new();

    let mut handles = Vec::new();
    for device in 0..16 {
        let client = client.clone();
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            let response = client
                .post(&url)
                .json(&json!({"device": device, "location": null}))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 200);
            assert_eq!(response.text().await.unwrap(), "Data received and logged");
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let entries: Vec<Value> = AppendLog::new(&log_path).read_all().await.unwrap();
    assert_eq!(entries.len(), 16);
    let mut devices: Vec<i64> = entries
        .iter()
        .map(|e| e["device"].as_i64().unwrap())
        .collect();
    devices.sort();
    assert_eq!(devices, (0..16).collect::<Vec<_>>());

    drop(client);
    stop.notify_one();
    server.await.unwrap().unwrap();
    std::fs::remove_file(log_path).unwrap();
}

#[tokio::test]
async fn test_shutdown_signal_stops_server() {
    let config = temp_config();
    let log_path = config.log_path.clone();
    let (stop, shutdown) = stop_signal();
    let (addr, server) = spawn_server(config, shutdown).await.unwrap();
    let url = format!("http://{}/sensordata", addr);

    let response = reqwest::Client::new()
        .post(&url)
        .json(&json!({"device": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    stop.notify_one();
    let result = tokio::time::timeout(Duration::from_secs(2), server)
        .await
        .expect("server didn't stop after the shutdown signal")
        .unwrap();
    assert!(result.is_ok());

    let entries: Vec<Value> = AppendLog::new(&log_path).read_all().await.unwrap();
    assert_eq!(entries, vec![json!({"device": 1})]);

    let refused = reqwest::Client::new()
        .post(&url)
        .json(&json!({"device": 2}))
        .send()
        .await;
    assert!(refused.is_err());
    std::fs::remove_file(log_path).unwrap();
}

#[tokio::test]
async fn test_bind_conflict_reported() {
    let (stop, shutdown) = stop_signal();
    let (addr, server) = spawn_server(temp_config(), shutdown).await.unwrap();
    let conflicting = IngestConfig {
        bind: addr.to_string(),
        ..temp_config()
    };
    assert!(spawn_server(conflicting, std::future::pending()).await.is_err());
    stop.notify_one();
    server.await.unwrap().unwrap();
}
