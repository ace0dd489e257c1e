//! # Crate sampler-rs
//!
//! ## sampler-rs
//!
//! The `sampler-rs` crate runs the sampling side of a sensor relay: it subscribes to an
//! accelerometer, a gyroscope and the device location, keeps the latest value pushed by
//! each of them, and on a fixed cadence assembles a timestamped [`Record`](common::Record)
//! that is posted as JSON to an ingestion endpoint.
//!
//! Features include:
//! - Latest-value streams over any push source implementing [`PushSource`](common::PushSource)
//! - Start/stop session lifecycle with idempotent guards
//! - Best-effort transmission with a bounded timeout and no retries
//! - Records are never sent until a location fix is available. A denied location
//!   permission is reported through [`SessionHealth`](session::SessionHealth)
//! - Per-tick [`TickReport`](models::report::TickReport)s to observe every send outcome
//! - Simulated sources with gaussian noise for demos and tests
//!
//! **NOTE** Nothing is persisted on the sampling side. A record that fails to reach the
//! endpoint on its first attempt is lost.

pub mod adapters;
pub mod assembler;
pub(crate) mod constants;
pub mod models;
pub mod ports;
pub mod services;
pub mod session;
pub mod streams;
pub mod transmitter;

pub use assembler::SnapshotAssembler;
pub use models::config::SamplerConfig;
pub use models::errors::SamplerError;
pub use models::report::{SendOutcome, TickReport};
pub use session::{SessionController, SessionHealth};
pub use streams::{LocationStatus, LocationStream, SensorStream};
pub use transmitter::{TransmissionStats, Transmitter};
