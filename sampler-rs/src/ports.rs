use async_trait::async_trait;

use common::Record;

use crate::models::report::SendOutcome;

#[async_trait]
pub trait TransportPort: Send + Sync {
    /// Issues a single delivery attempt of `record` to the ingestion endpoint.
    /// Failures are reported in the outcome, never retried.
    async fn post_record(&self, record: &Record) -> SendOutcome;

    /// Destination of the records, for logging
    fn destination(&self) -> &str;
}
