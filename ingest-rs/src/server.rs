use axum::{extract::State, routing::post, Json, Router};
use common::constants::INGEST_PATH;
use serde_json::Value;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::config::IngestConfig;
use crate::error::ApiResult;
use crate::storage::AppendLog;

pub const ACK_MESSAGE: &str = "Data received and logged";

#[derive(Clone)]
pub struct AppState {
    pub log: Arc<AppendLog>,
}

impl AppState {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            log: Arc::new(AppendLog::new(config.log_path.clone())),
        }
    }
}

/// Appends the body verbatim. Anything that parses as JSON is accepted.
pub async fn append_sensor_data(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<&'static str> {
    state.log.append(&payload).await?;
    log::debug!("Sensor data logged: {}", payload);
    Ok(ACK_MESSAGE)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(INGEST_PATH, post(append_sensor_data))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: IngestConfig) -> std::io::Result<()> {
    let app = router(AppState::new(&config));

    log::info!(
        "Starting server on {}, logging to {}",
        config.bind,
        config.log_path.display()
    );

    let listener = TcpListener::bind(&config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            log::info!("Shutting down");
        })
        .await
}

/// Binds `config.bind` and serves in the background until `shutdown` resolves. Requests
/// in flight at that point are completed before the task finishes.
///
/// Returns the bound address, so a port of 0 can be used to pick a free one.
pub async fn spawn_server<F>(
    config: IngestConfig,
    shutdown: F,
) -> std::io::Result<(SocketAddr, JoinHandle<std::io::Result<()>>)>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(AppState::new(&config));
    let listener = TcpListener::bind(&config.bind).await?;
    let addr = listener.local_addr()?;
    log::info!("Serving on {}", addr);
    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                log::info!("Shutting down {}", addr);
            })
            .await
    });
    Ok((addr, handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    fn temp_config() -> IngestConfig {
        IngestConfig {
            bind: "127.0.0.1:0".to_string(),
            log_path: std::env::temp_dir().join(format!("ingest-{}.ndjson", uuid::Uuid::new_v4())),
        }
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(INGEST_PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_post_is_logged_and_acknowledged() {
        let config = temp_config();
        let state = AppState::new(&config);
        let body = json!({
            "timestamp": "2024-05-01T10:00:00.000Z",
            "accelerometer": {"x": 0.1, "y": 0.2, "z": 9.8},
            "gyroscope": {"x": 0.0, "y": 0.0, "z": 0.0},
            "location": {"latitude": 37.0, "longitude": -122.0, "accuracy": 5.0}
        });

        let response = router(state.clone())
            .oneshot(post_json(&body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], ACK_MESSAGE.as_bytes());

        let entries: Vec<Value> = state.log.read_all().await.unwrap();
        assert_eq!(entries, vec![body]);
        std::fs::remove_file(&config.log_path).unwrap();
    }

    #[tokio::test]
    async fn test_arbitrary_json_is_accepted() {
        let config = temp_config();
        let state = AppState::new(&config);
        for body in [r#"{"unexpected": true}"#, "[1,2,3]", "42"] {
            let response = router(state.clone()).oneshot(post_json(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        let entries: Vec<Value> = state.log.read_all().await.unwrap();
        assert_eq!(entries.len(), 3);
        std::fs::remove_file(&config.log_path).unwrap();
    }

    #[tokio::test]
    async fn test_invalid_json_is_rejected_without_logging() {
        let config = temp_config();
        let state = AppState::new(&config);
        let response = router(state.clone())
            .oneshot(post_json("{not json"))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
        let entries: Vec<Value> = state.log.read_all().await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_returns_500() {
        let config = IngestConfig {
            bind: "127.0.0.1:0".to_string(),
            log_path: "/nonexistent-dir/log.ndjson".into(),
        };
        let response = router(AppState::new(&config))
            .oneshot(post_json("{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let error: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error["error"], "storage_error");
    }

    #[tokio::test]
    async fn test_other_routes_not_found() {
        let config = temp_config();
        let request = Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = router(AppState::new(&config)).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
