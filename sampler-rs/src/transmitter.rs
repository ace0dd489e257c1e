use log::{debug, error, warn};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::Record;

use crate::models::report::SendOutcome;
use crate::ports::TransportPort;

/// Counters of transmission outcomes since the transmitter was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TransmissionStats {
    pub delivered: u64,
    pub skipped_no_location: u64,
    pub rejected: u64,
    pub timed_out: u64,
    pub transport_errors: u64,
}

impl TransmissionStats {
    pub fn failed(&self) -> u64 {
        self.rejected + self.timed_out + self.transport_errors
    }
}

#[derive(Default)]
struct Counters {
    delivered: AtomicU64,
    skipped_no_location: AtomicU64,
    rejected: AtomicU64,
    timed_out: AtomicU64,
    transport_errors: AtomicU64,
}

/// Best-effort sender of records. One attempt per record, no retry, no queue.
pub struct Transmitter {
    port: Arc<dyn TransportPort>,
    timeout: Duration,
    counters: Counters,
}

impl Transmitter {
    pub fn new(port: Arc<dyn TransportPort>, timeout: Duration) -> Self {
        Self {
            port,
            timeout,
            counters: Counters::default(),
        }
    }

    /// Sends `record` unless it has no location. Never fails: non success statuses,
    /// timeouts and transport errors are logged and dropped.
    pub async fn send(&self, record: &Record) -> SendOutcome {
        if !record.has_location() {
            debug!("Skipping record {}: no location yet", record.timestamp);
            self.counters
                .skipped_no_location
                .fetch_add(1, Ordering::Relaxed);
            return SendOutcome::SkippedNoLocation;
        }

        let outcome = tokio::time::timeout(self.timeout, self.port.post_record(record))
            .await
            .unwrap_or(SendOutcome::TimedOut);

        match &outcome {
            SendOutcome::Delivered(status) => {
                debug!(
                    "Record {} delivered to {} ({})",
                    record.timestamp,
                    self.port.destination(),
                    status
                );
                self.counters.delivered.fetch_add(1, Ordering::Relaxed);
            }
            SendOutcome::Rejected(status) => {
                error!("Failed to send data: {} answered {}", self.port.destination(), status);
                self.counters.rejected.fetch_add(1, Ordering::Relaxed);
            }
            SendOutcome::TimedOut => {
                warn!(
                    "Sending record {} timed out after {} ms",
                    record.timestamp,
                    self.timeout.as_millis()
                );
                self.counters.timed_out.fetch_add(1, Ordering::Relaxed);
            }
            SendOutcome::TransportError(e) => {
                error!("Error sending data to server: {}", e);
                self.counters.transport_errors.fetch_add(1, Ordering::Relaxed);
            }
            SendOutcome::SkippedNoLocation => {}
        }
        outcome
    }

    pub fn stats(&self) -> TransmissionStats {
        TransmissionStats {
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            skipped_no_location: self.counters.skipped_no_location.load(Ordering::Relaxed),
            rejected: self.counters.rejected.load(Ordering::Relaxed),
            timed_out: self.counters.timed_out.load(Ordering::Relaxed),
            transport_errors: self.counters.transport_errors.load(Ordering::Relaxed),
        }
    }
}
