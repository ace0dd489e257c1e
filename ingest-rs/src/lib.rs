//! # Crate ingest-rs
//!
//! Collection endpoint of the sensor relay. Every JSON body posted to `/sensordata` is
//! appended as one line to an append-only log, so the log is a sequence of JSON objects
//! (NDJSON) that has to be read line by line.
//!
//! Bodies are not validated beyond being JSON. Appends from concurrent devices never
//! interleave; their relative order is unspecified.

pub mod config;
pub mod error;
pub mod server;
pub mod storage;

pub use config::IngestConfig;
pub use server::{router, run_server, spawn_server, AppState};
pub use storage::{AppendLog, StorageError};
