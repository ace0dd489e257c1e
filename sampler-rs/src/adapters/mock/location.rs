use async_trait::async_trait;
use rand::{rngs::StdRng, SeedableRng};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

use common::{
    Coordinate, LocationPolicy, LocationSource, Notifiable, PermissionStatus, PushSource,
    SourceError,
};
use publisher::{Publishable, Publisher};

use super::gaussian::GaussianNoise;
use super::generator::spawn_generator;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone)]
struct Wander {
    origin: Coordinate,
    noise: GaussianNoise,
}

/// Emulates the device geolocation service.
pub struct SimulatedLocation {
    publisher: Publisher<Coordinate>,
    permission: Mutex<PermissionStatus>,
    wander: Option<Wander>,
    task: Mutex<Option<JoinHandle<()>>>,
    last_policy: Mutex<Option<LocationPolicy>>,
}

impl Default for SimulatedLocation {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedLocation {
    /// Location service granting access, driven by hand through [`push`](Self::push)
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Location service where the user refused access
    pub fn denied() -> Self {
        let location = Self::new();
        location.set_permission(PermissionStatus::Denied);
        location
    }

    /// Location service reporting fixes around `origin`, with gaussian noise in degrees
    /// applied to latitude and longitude, every `time_interval_ms` of the subscribed
    /// policy. Subscribing requires a running tokio runtime.
    pub fn with_noise(origin: Coordinate, noise: GaussianNoise) -> Self {
        Self::build(Some(Wander { origin, noise }))
    }

    fn build(wander: Option<Wander>) -> Self {
        Self {
            publisher: Publisher::new(),
            permission: Mutex::new(PermissionStatus::Granted),
            wander,
            task: Mutex::new(None),
            last_policy: Mutex::new(None),
        }
    }

    pub fn set_permission(&self, permission: PermissionStatus) {
        *lock(&self.permission) = permission;
    }

    /// Delivers `coordinate` to every subscriber
    pub fn push(&self, coordinate: Coordinate) {
        self.publisher.notify_listeners(Arc::new(coordinate));
    }

    pub fn subscriber_count(&self) -> usize {
        self.publisher.len()
    }

    /// Policy requested by the last subscriber
    pub fn last_policy(&self) -> Option<LocationPolicy> {
        lock(&self.last_policy).clone()
    }

    fn ensure_generator(&self, period: Duration) {
        let Some(wander) = self.wander.clone() else {
            return;
        };
        let mut task = lock(&self.task);
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }
        let mut rng = StdRng::from_entropy();
        *task = Some(spawn_generator(self.publisher.clone(), period, move || {
            let [latitude, longitude] = wander.noise.add_noise(
                &mut rng,
                [wander.origin.latitude, wander.origin.longitude],
            );
            Coordinate::new(latitude, longitude, wander.origin.accuracy)
        }));
    }
}

impl PushSource<Coordinate> for SimulatedLocation {
    type Options = LocationPolicy;

    fn subscribe(
        &self,
        options: &LocationPolicy,
        listener: &mut dyn Notifiable<Coordinate>,
    ) -> Result<Uuid, SourceError> {
        if *lock(&self.permission) == PermissionStatus::Denied {
            return Err(SourceError::Unavailable(
                "location permission denied".to_string(),
            ));
        }
        let id = self.publisher.register_listener(listener);
        *lock(&self.last_policy) = Some(options.clone());
        self.ensure_generator(Duration::from_millis(options.time_interval_ms.max(1)));
        Ok(id)
    }

    fn unsubscribe(&self, id: Uuid) {
        self.publisher.unregister_listener(id);
        if self.publisher.is_empty() {
            if let Some(task) = lock(&self.task).take() {
                task.abort();
            }
        }
    }
}

#[async_trait]
impl LocationSource for SimulatedLocation {
    async fn request_permission(&self) -> PermissionStatus {
        *lock(&self.permission)
    }
}

impl Drop for SimulatedLocation {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.task).take() {
            task.abort();
        }
    }
}
