//! Latest-value streams over push sources.
//!
//! Each stream owns one slot holding the most recent value delivered by its source.
//! Values are replaced on every push and never buffered, so a value superseded between
//! two reads is not observed.

pub mod location_stream;
pub mod sensor_stream;
pub(crate) mod slot;

use std::sync::Arc;
use std::time::Duration;

use common::{LocationSource, PushSource, SensorSample};

pub use location_stream::{LocationStatus, LocationStream};
pub use sensor_stream::SensorStream;

pub type SharedSensorSource = Arc<dyn PushSource<SensorSample, Options = Duration>>;
pub type SharedLocationSource = Arc<dyn LocationSource>;

/// Non blocking, non consuming read of the latest value.
pub trait LatestValue<T>: Send + Sync {
    fn peek(&self) -> T;
}
