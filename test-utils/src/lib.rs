//! Fixtures shared by the workspace tests: recorded sensor traces and a mock ingestion
//! endpoint.

pub mod csv_loader;
pub mod ingest_mock;

pub use csv_loader::{load_trace, TraceRow, TRACE_PATH};
pub use ingest_mock::IngestMock;
