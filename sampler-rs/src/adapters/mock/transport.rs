use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use common::Record;

use crate::models::report::SendOutcome;
use crate::ports::TransportPort;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Behaviour of the emulated ingestion endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum MockResponse {
    /// Answer immediately with the given status
    Status(u16),
    /// Answer 200 after the given delay
    Delay(Duration),
    /// Fail as if the endpoint couldn't be reached
    Unreachable,
}

/// In-memory transport keeping every record it was asked to post.
pub struct TransportMock {
    response: Mutex<MockResponse>,
    received: Mutex<Vec<Record>>,
}

impl TransportMock {
    pub fn new(response: MockResponse) -> Self {
        Self {
            response: Mutex::new(response),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn set_response(&self, response: MockResponse) {
        *lock(&self.response) = response;
    }

    /// Records posted so far, including the ones that were answered with an error
    pub fn received(&self) -> Vec<Record> {
        lock(&self.received).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.received).len()
    }
}

#[async_trait]
impl TransportPort for TransportMock {
    async fn post_record(&self, record: &Record) -> SendOutcome {
        lock(&self.received).push(record.clone());
        let response = lock(&self.response).clone();
        match response {
            MockResponse::Status(status) if (200..300).contains(&status) => {
                SendOutcome::Delivered(status)
            }
            MockResponse::Status(status) => SendOutcome::Rejected(status),
            MockResponse::Delay(delay) => {
                tokio::time::sleep(delay).await;
                SendOutcome::Delivered(200)
            }
            MockResponse::Unreachable => {
                SendOutcome::TransportError("connection refused".to_string())
            }
        }
    }

    fn destination(&self) -> &str {
        "mock://sensordata"
    }
}
