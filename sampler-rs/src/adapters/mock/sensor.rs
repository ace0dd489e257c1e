use rand::{rngs::StdRng, SeedableRng};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

use common::{Notifiable, PushSource, SensorSample, SourceError};
use publisher::{Publishable, Publisher};

use super::gaussian::GaussianNoise;
use super::generator::spawn_generator;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone)]
struct NoisyReading {
    baseline: [f64; 3],
    noise: GaussianNoise,
}

/// Emulates a motion sensor.
pub struct SimulatedSensor {
    publisher: Publisher<SensorSample>,
    reading: Option<NoisyReading>,
    available: bool,
    task: Mutex<Option<JoinHandle<()>>>,
    last_interval: Mutex<Option<Duration>>,
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedSensor {
    /// Sensor driven by hand through [`push`](Self::push)
    pub fn new() -> Self {
        Self::build(None, true)
    }

    /// Sensor refusing every subscription
    pub fn unavailable() -> Self {
        Self::build(None, false)
    }

    /// Sensor pushing `baseline` plus gaussian noise at the subscribed interval.
    /// Subscribing requires a running tokio runtime.
    pub fn with_noise(baseline: [f64; 3], noise: GaussianNoise) -> Self {
        Self::build(Some(NoisyReading { baseline, noise }), true)
    }

    fn build(reading: Option<NoisyReading>, available: bool) -> Self {
        Self {
            publisher: Publisher::new(),
            reading,
            available,
            task: Mutex::new(None),
            last_interval: Mutex::new(None),
        }
    }

    /// Delivers `sample` to every subscriber
    pub fn push(&self, sample: SensorSample) {
        self.publisher.notify_listeners(Arc::new(sample));
    }

    pub fn subscriber_count(&self) -> usize {
        self.publisher.len()
    }

    /// Interval requested by the last subscriber
    pub fn last_interval(&self) -> Option<Duration> {
        *lock(&self.last_interval)
    }

    fn ensure_generator(&self, interval: Duration) {
        let Some(reading) = self.reading.clone() else {
            return;
        };
        let mut task = lock(&self.task);
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }
        let mut rng = StdRng::from_entropy();
        *task = Some(spawn_generator(
            self.publisher.clone(),
            interval,
            move || SensorSample::new(reading.noise.add_noise(&mut rng, reading.baseline)),
        ));
    }
}

impl PushSource<SensorSample> for SimulatedSensor {
    type Options = Duration;

    fn subscribe(
        &self,
        options: &Duration,
        listener: &mut dyn Notifiable<SensorSample>,
    ) -> Result<Uuid, SourceError> {
        if !self.available {
            return Err(SourceError::Unavailable("simulated sensor disabled".to_string()));
        }
        if options.is_zero() {
            return Err(SourceError::InvalidOptions(
                "update interval must be positive".to_string(),
            ));
        }
        let id = self.publisher.register_listener(listener);
        *lock(&self.last_interval) = Some(*options);
        self.ensure_generator(*options);
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

impl Drop for SimulatedSensor {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.task).take() {
            task.abort();
        }
    }
}
