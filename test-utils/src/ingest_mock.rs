use common::constants::INGEST_PATH;
use common::Record;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACK_MESSAGE: &str = "Data received and logged";

/// Stand-in for the ingestion service. Answers every post to the ingest path and keeps
/// the received bodies for inspection.
pub struct IngestMock {
    server: MockServer,
}

impl IngestMock {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        mount_status(&server, 200, None).await;
        Self { server }
    }

    /// Answers the first `failures` posts with `status`, and acknowledges afterwards.
    pub async fn failing_first(status: u16, failures: u64) -> Self {
        let server = MockServer::start().await;
        mount_status(&server, status, Some(failures)).await;
        mount_status(&server, 200, None).await;
        Self { server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub async fn post_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }

    /// Decodes every received body, in arrival order. Panics on a body that is not a
    /// record.
    pub async fn records(&self) -> Vec<Record> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| {
                serde_json::from_slice(&request.body).unwrap_or_else(|e| {
                    panic!(
                        "Body is not a record ({}): {}",
                        e,
                        String::from_utf8_lossy(&request.body)
                    )
                })
            })
            .collect()
    }
}

async fn mount_status(server: &MockServer, status: u16, times: Option<u64>) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_string(ACK_MESSAGE)
    } else {
        ResponseTemplate::new(status).set_body_string("Internal Server Error")
    };
    let mock = Mock::given(method("POST"))
        .and(path(INGEST_PATH))
        .respond_with(response);
    match times {
        Some(n) => mock.up_to_n_times(n).mount(server).await,
        None => mock.mount(server).await,
    }
}
