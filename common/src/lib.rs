//! General functionality shared by the sampling device and the ingestion service.
//!
//! Holds the data model of a transmitted record, the wall clock used to stamp it and
//! the capability traits that isolate platform sensor and location APIs.

pub mod constants;

#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod types;

// Re-export traits
#[doc(inline)]
pub use traits::{LocationSource, Notifiable, PushSource};

// Re-export types
#[doc(inline)]
pub use types::{
    AccuracyTier, Callback, Clock, Coordinate, LocationPolicy, PermissionStatus, Record,
    SensorSample, SensorType, SessionState, SourceError,
};
