pub mod callback;
pub mod clock;
pub mod coordinate;
pub mod errors;
pub mod location;
pub mod record;
pub mod sensor_sample;
pub mod sensor_type;
pub mod session_state;

pub use callback::Callback;
pub use clock::Clock;
pub use coordinate::Coordinate;
pub use errors::SourceError;
pub use location::{AccuracyTier, LocationPolicy, PermissionStatus};
pub use record::Record;
pub use sensor_sample::SensorSample;
pub use sensor_type::SensorType;
pub use session_state::SessionState;
