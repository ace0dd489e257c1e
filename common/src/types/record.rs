use serde::{Deserialize, Serialize};

use crate::types::{Clock, Coordinate, SensorSample};

/// One timestamped combination of accelerometer, gyroscope and location readings.
///
/// Field order is the wire order expected by the ingestion endpoint:
///
/// ```json
/// {
///   "timestamp": "2024-05-01T10:20:30.123Z",
///   "accelerometer": {"x": 0.1, "y": 0.2, "z": 9.8},
///   "gyroscope": {"x": 0.0, "y": 0.0, "z": 0.0},
///   "location": {"latitude": 37.0, "longitude": -122.0, "accuracy": 5.0}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: String,
    pub accelerometer: SensorSample,
    pub gyroscope: SensorSample,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
}

impl Record {
    pub fn new(
        timestamp: String,
        accelerometer: SensorSample,
        gyroscope: SensorSample,
        location: Option<Coordinate>,
    ) -> Self {
        Self {
            timestamp,
            accelerometer,
            gyroscope,
            location,
        }
    }

    /// Builds a record stamped with the current wall clock time
    pub fn stamped_now(
        accelerometer: SensorSample,
        gyroscope: SensorSample,
        location: Option<Coordinate>,
    ) -> Self {
        Self::new(Clock::now_iso8601(), accelerometer, gyroscope, location)
    }

    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}
