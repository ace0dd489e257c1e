use log::{debug, info};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use uuid::Uuid;

use common::{SensorSample, SensorType, SourceError};
use publisher::Listener;

use crate::streams::slot::Slot;
use crate::streams::{LatestValue, SharedSensorSource};

/// Keeps the latest sample pushed by a motion sensor.
pub struct SensorStream {
    sensor_type: SensorType,
    source: SharedSensorSource,
    slot: Arc<Slot<SensorSample>>,
    subscription: Mutex<Option<Uuid>>,
}

impl SensorStream {
    pub fn new(sensor_type: SensorType, source: SharedSensorSource) -> Self {
        Self {
            sensor_type,
            source,
            slot: Arc::new(Slot::new(SensorSample::default())),
            subscription: Mutex::new(None),
        }
    }

    /// Subscribes to the source. Calling it on a subscribed stream does nothing.
    pub fn start(&self, update_interval: Duration) -> Result<(), SourceError> {
        let mut subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if subscription.is_some() {
            return Ok(());
        }

        self.slot.open();
        let slot = self.slot.clone();
        let sensor_type = self.sensor_type;
        let mut listener = Listener::new(move |_id: Uuid, sample: Arc<SensorSample>| {
            if !slot.store(*sample) {
                debug!("Dropping {} sample pushed after stop", sensor_type);
            }
        });

        match self.source.subscribe(&update_interval, &mut listener) {
            Ok(id) => {
                info!(
                    "Subscribed to {} every {} ms",
                    self.sensor_type,
                    update_interval.as_millis()
                );
                *subscription = Some(id);
                Ok(())
            }
            Err(e) => {
                self.slot.close();
                Err(e)
            }
        }
    }

    /// Unsubscribes from the source. The last sample stays available to `peek`.
    pub fn stop(&self) {
        let mut subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.slot.close();
        if let Some(id) = subscription.take() {
            self.source.unsubscribe(id);
            info!("Unsubscribed from {}", self.sensor_type);
        }
    }

    /// Latest sample, or the all-zero sample if nothing was pushed yet
    pub fn peek(&self) -> SensorSample {
        self.slot.peek()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }
}

impl LatestValue<SensorSample> for SensorStream {
    fn peek(&self) -> SensorSample {
        SensorStream::peek(self)
    }
}
