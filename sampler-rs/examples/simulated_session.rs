use common::Record;
use env_logger::Env;
use ingest_rs::{spawn_server, AppendLog, IngestConfig};
use sampler_rs::{services, SamplerConfig};
use std::sync::Arc;
use tokio::sync::Notify;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Local ingestion endpoint on a free port
    let log_path = std::env::temp_dir().join("simulated_session.ndjson");
    let _ = std::fs::remove_file(&log_path);
    let stop_server = Arc::new(Notify::new());
    let (addr, server) = spawn_server(
        IngestConfig {
            bind: "127.0.0.1:0".to_string(),
            log_path: log_path.clone(),
        },
        {
            let stop_server = stop_server.clone();
            async move { stop_server.notified().await }
        },
    )
    .await
    .unwrap();

    let config = SamplerConfig {
        transmit_interval_ms: 250,
        sensor_interval_ms: 50,
        ..SamplerConfig::with_endpoint(&format!("http://{}", addr))
    };
    let (handle, session) = services::run_mock_session(config, true, 3000).unwrap();

    let mut reports = session.subscribe_reports();
    tokio::spawn(async move {
        while let Ok(report) = reports.recv().await {
            println!("{:>3} {} {:?}", report.tick, report.timestamp, report.outcome);
        }
    });

    handle.await.unwrap();
    println!("{:?}", session.health().await);

    drop(session);
    stop_server.notify_one();
    server.await.unwrap().unwrap();

    let logged: Vec<Record> = AppendLog::new(&log_path).read_all().await.unwrap();
    if let Some(last) = logged.last() {
        println!("{} records logged, last: {}", logged.len(), last.to_json().unwrap());
    }
}
