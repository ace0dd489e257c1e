use log::{debug, info, warn};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use common::{Coordinate, LocationPolicy, PermissionStatus, SourceError};
use publisher::Listener;

use crate::streams::slot::Slot;
use crate::streams::{LatestValue, SharedLocationSource};

/// Access to the device location as seen by the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    /// Permission not requested yet
    #[default]
    Pending,
    Granted,
    /// Location will stay absent and no record can be transmitted
    Denied,
}

impl From<PermissionStatus> for LocationStatus {
    fn from(value: PermissionStatus) -> Self {
        match value {
            PermissionStatus::Granted => LocationStatus::Granted,
            PermissionStatus::Denied => LocationStatus::Denied,
        }
    }
}

#[derive(Default)]
struct Subscription {
    id: Option<Uuid>,
    status: LocationStatus,
}

/// Keeps the latest coordinate pushed by the location source.
pub struct LocationStream {
    source: SharedLocationSource,
    slot: Arc<Slot<Option<Coordinate>>>,
    subscription: Mutex<Subscription>,
}

impl LocationStream {
    pub fn new(source: SharedLocationSource) -> Self {
        Self {
            source,
            slot: Arc::new(Slot::new(None)),
            subscription: Mutex::new(Subscription::default()),
        }
    }

    fn subscription(&self) -> MutexGuard<'_, Subscription> {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Asks for location access and starts watching the position.
    ///
    /// A denied permission is not an error: the stream stays unsubscribed, its value stays
    /// absent and [`status`](Self::status) reports [`LocationStatus::Denied`].
    pub async fn start(&self, policy: &LocationPolicy) -> Result<(), SourceError> {
        if self.is_subscribed() {
            return Ok(());
        }

        let permission = self.source.request_permission().await;
        let mut subscription = self.subscription();
        subscription.status = permission.into();
        if subscription.id.is_some() {
            return Ok(());
        }
        if permission == PermissionStatus::Denied {
            warn!("Permission to access location was denied, no record will be transmitted");
            return Ok(());
        }

        self.slot.open();
        let slot = self.slot.clone();
        let mut listener = Listener::new(move |_id: Uuid, coordinate: Arc<Coordinate>| {
            if !slot.store(Some(*coordinate)) {
                debug!("Dropping location pushed after stop");
            }
        });

        match self.source.subscribe(policy, &mut listener) {
            Ok(id) => {
                info!(
                    "Watching location ({:?}, every {} ms / {} m)",
                    policy.accuracy, policy.time_interval_ms, policy.distance_interval_m
                );
                subscription.id = Some(id);
                Ok(())
            }
            Err(e) => {
                self.slot.close();
                Err(e)
            }
        }
    }

    /// Stops watching the position. The last coordinate stays available to `peek`.
    pub fn stop(&self) {
        let mut subscription = self.subscription();
        self.slot.close();
        if let Some(id) = subscription.id.take() {
            self.source.unsubscribe(id);
            info!("Stopped watching location");
        }
    }

    /// Latest coordinate, `None` until the first fix arrives
    pub fn peek(&self) -> Option<Coordinate> {
        self.slot.peek()
    }

    pub fn status(&self) -> LocationStatus {
        self.subscription().status
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription().id.is_some()
    }
}

impl LatestValue<Option<Coordinate>> for LocationStream {
    fn peek(&self) -> Option<Coordinate> {
        LocationStream::peek(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::SimulatedLocation;

    #[tokio::test]
    async fn test_peek_before_fix_is_absent() {
        let source = Arc::new(SimulatedLocation::new());
        let stream = LocationStream::new(source.clone());
        assert_eq!(stream.status(), LocationStatus::Pending);

        stream.start(&LocationPolicy::default()).await.unwrap();
        assert_eq!(stream.status(), LocationStatus::Granted);
        assert_eq!(stream.peek(), None);
    }

    #[tokio::test]
    async fn test_peek_returns_last_fix() {
        let source = Arc::new(SimulatedLocation::new());
        let stream = LocationStream::new(source.clone());
        stream.start(&LocationPolicy::default()).await.unwrap();

        source.push(Coordinate::new(37.0, -122.0, 5.0));
        source.push(Coordinate::new(37.1, -122.1, 3.0));
        assert_eq!(stream.peek(), Some(Coordinate::new(37.1, -122.1, 3.0)));
    }

    #[tokio::test]
    async fn test_policy_reaches_source() {
        let source = Arc::new(SimulatedLocation::new());
        let stream = LocationStream::new(source.clone());
        let policy = LocationPolicy {
            time_interval_ms: 2000,
            distance_interval_m: 10.0,
            ..LocationPolicy::default()
        };
        stream.start(&policy).await.unwrap();
        assert_eq!(source.last_policy(), Some(policy));
    }

    #[tokio::test]
    async fn test_denied_permission_is_observable() {
        let source = Arc::new(SimulatedLocation::denied());
        let stream = LocationStream::new(source.clone());
        stream.start(&LocationPolicy::default()).await.unwrap();

        assert_eq!(stream.status(), LocationStatus::Denied);
        assert!(!stream.is_subscribed());
        assert_eq!(source.subscriber_count(), 0);

        source.push(Coordinate::new(37.0, -122.0, 5.0));
        assert_eq!(stream.peek(), None);
    }

    #[tokio::test]
    async fn test_stop_blocks_later_fixes() {
        let source = Arc::new(SimulatedLocation::new());
        let stream = LocationStream::new(source.clone());
        stream.start(&LocationPolicy::default()).await.unwrap();
        source.push(Coordinate::new(1.0, 2.0, 3.0));

        stream.stop();
        source.push(Coordinate::new(4.0, 5.0, 6.0));

        assert_eq!(stream.peek(), Some(Coordinate::new(1.0, 2.0, 3.0)));
        assert_eq!(source.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_start_twice_subscribes_once() {
        let source = Arc::new(SimulatedLocation::new());
        let stream = LocationStream::new(source.clone());
        stream.start(&LocationPolicy::default()).await.unwrap();
        stream.start(&LocationPolicy::default()).await.unwrap();
        assert_eq!(source.subscriber_count(), 1);
    }
}
