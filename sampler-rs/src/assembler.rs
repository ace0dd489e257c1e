use std::sync::Arc;

use common::{Coordinate, Record, SensorSample};

use crate::streams::LatestValue;

/// Builds one record per tick out of the latest value of each stream.
///
/// Reads are not atomic across streams; a push landing between two reads of the same
/// tick is accepted.
pub struct SnapshotAssembler {
    accelerometer: Arc<dyn LatestValue<SensorSample>>,
    gyroscope: Arc<dyn LatestValue<SensorSample>>,
    location: Arc<dyn LatestValue<Option<Coordinate>>>,
}

impl SnapshotAssembler {
    pub fn new(
        accelerometer: Arc<dyn LatestValue<SensorSample>>,
        gyroscope: Arc<dyn LatestValue<SensorSample>>,
        location: Arc<dyn LatestValue<Option<Coordinate>>>,
    ) -> Self {
        Self {
            accelerometer,
            gyroscope,
            location,
        }
    }

    /// Stamps the current wall clock time on the latest readings.
    /// Never fails, missing readings are carried as their "no data" value.
    pub fn assemble(&self) -> Record {
        Record::stamped_now(
            self.accelerometer.peek(),
            self.gyroscope.peek(),
            self.location.peek(),
        )
    }
}
