// Delivery of records to the ingestion service over HTTP.

use async_trait::async_trait;
use std::time::Duration;

use common::Record;

use crate::models::errors::SamplerError;
use crate::models::http_client::HttpClient;
use crate::models::report::SendOutcome;
use crate::ports::TransportPort;

/// Posts records as JSON to `<endpoint>/sensordata`
pub struct HttpTransport {
    client: HttpClient,
}

impl HttpTransport {
    /// Returns a ClientBuild error if the http client can't be created
    pub fn new(ingest_url: &str, timeout: Duration) -> Result<Self, SamplerError> {
        let client = HttpClient::new(ingest_url.to_string(), timeout)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TransportPort for HttpTransport {
    async fn post_record(&self, record: &Record) -> SendOutcome {
        match self.client.post_json(record).await {
            Ok(status) if status.is_success() => SendOutcome::Delivered(status.as_u16()),
            Ok(status) => SendOutcome::Rejected(status.as_u16()),
            Err(e) if e.is_timeout() => SendOutcome::TimedOut,
            Err(e) => SendOutcome::TransportError(e.to_string()),
        }
    }

    fn destination(&self) -> &str {
        self.client.url()
    }
}
