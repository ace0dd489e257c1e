use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use common::{SensorType, SessionState};

use crate::adapters::production::HttpTransport;
use crate::assembler::SnapshotAssembler;
use crate::constants::REPORT_CHANNEL_CAPACITY;
use crate::models::config::SamplerConfig;
use crate::models::errors::SamplerError;
use crate::models::report::TickReport;
use crate::ports::TransportPort;
use crate::streams::{
    LocationStatus, LocationStream, SensorStream, SharedLocationSource, SharedSensorSource,
};
use crate::transmitter::{TransmissionStats, Transmitter};

/// Observable condition of a session.
///
/// A session whose location access was denied keeps sampling motion sensors but never
/// transmits; `location` is [`LocationStatus::Denied`] and `skipped_no_location` grows on
/// every tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionHealth {
    pub state: SessionState,
    pub location: LocationStatus,
    pub transmission: TransmissionStats,
}

struct Lifecycle {
    state: SessionState,
    timer: Option<JoinHandle<()>>,
}

/// Owns the start/stop lifecycle of a sampling session.
///
/// While active, both motion streams and the location stream are subscribed and a timer
/// assembles and transmits one record per period. Every send runs on its own task so a
/// slow endpoint never delays the next tick.
pub struct SessionController {
    config: SamplerConfig,
    accelerometer: Arc<SensorStream>,
    gyroscope: Arc<SensorStream>,
    location: Arc<LocationStream>,
    assembler: Arc<SnapshotAssembler>,
    transmitter: Arc<Transmitter>,
    lifecycle: Mutex<Lifecycle>,
    reports: broadcast::Sender<TickReport>,
}

impl SessionController {
    /// Returns a Config error if the configuration is invalid
    pub fn new(
        config: SamplerConfig,
        accelerometer: SharedSensorSource,
        gyroscope: SharedSensorSource,
        location: SharedLocationSource,
        transport: Arc<dyn TransportPort>,
    ) -> Result<Self, SamplerError> {
        config.validate()?;

        let accelerometer = Arc::new(SensorStream::new(SensorType::Accelerometer, accelerometer));
        let gyroscope = Arc::new(SensorStream::new(SensorType::Gyroscope, gyroscope));
        let location = Arc::new(LocationStream::new(location));
        let assembler = Arc::new(SnapshotAssembler::new(
            accelerometer.clone(),
            gyroscope.clone(),
            location.clone(),
        ));
        let transmitter = Arc::new(Transmitter::new(transport, config.send_timeout()));
        let (reports, _) = broadcast::channel(REPORT_CHANNEL_CAPACITY);

        Ok(Self {
            config,
            accelerometer,
            gyroscope,
            location,
            assembler,
            transmitter,
            lifecycle: Mutex::new(Lifecycle {
                state: SessionState::Idle,
                timer: None,
            }),
            reports,
        })
    }

    /// Session posting records over HTTP to the configured endpoint.
    /// Returns ClientBuild error if the http client can't be created.
    pub fn with_http(
        config: SamplerConfig,
        accelerometer: SharedSensorSource,
        gyroscope: SharedSensorSource,
        location: SharedLocationSource,
    ) -> Result<Self, SamplerError> {
        config.validate()?;
        let transport = HttpTransport::new(&config.ingest_url(), config.send_timeout())?;
        Self::new(
            config,
            accelerometer,
            gyroscope,
            location,
            Arc::new(transport),
        )
    }

    /// Idle -> Active. Subscribes all streams and starts the transmission timer.
    /// Does nothing if the session is already active.
    ///
    /// A denied location permission doesn't fail the start, see [`SessionHealth`].
    /// Returns a Source error if a stream can't subscribe; the session stays idle.
    pub async fn start(&self) -> Result<(), SamplerError> {
        let mut lifecycle = self.lifecycle.lock().await;
        if lifecycle.state == SessionState::Active {
            debug!("Session already active");
            return Ok(());
        }

        let interval = self.config.sensor_interval();
        self.accelerometer.start(interval)?;
        if let Err(e) = self.gyroscope.start(interval) {
            self.accelerometer.stop();
            return Err(e.into());
        }
        if let Err(e) = self.location.start(&self.config.location).await {
            self.accelerometer.stop();
            self.gyroscope.stop();
            return Err(e.into());
        }

        lifecycle.timer = Some(self.spawn_timer());
        lifecycle.state = SessionState::Active;
        info!(
            "Sampling session started, sending to {} every {} ms",
            self.config.ingest_url(),
            self.config.transmit_interval_ms
        );
        Ok(())
    }

    /// Active -> Idle. Cancels the timer and unsubscribes all streams. Sends already in
    /// flight complete on their own. Does nothing if the session is idle.
    pub async fn stop(&self) {
        let mut lifecycle = self.lifecycle.lock().await;
        if lifecycle.state == SessionState::Idle {
            debug!("Session already idle");
            return;
        }

        if let Some(timer) = lifecycle.timer.take() {
            timer.abort();
        }
        self.accelerometer.stop();
        self.gyroscope.stop();
        self.location.stop();
        lifecycle.state = SessionState::Idle;
        info!("Sampling session stopped");
    }

    fn spawn_timer(&self) -> JoinHandle<()> {
        let assembler = self.assembler.clone();
        let transmitter = self.transmitter.clone();
        let reports = self.reports.clone();
        let period = self.config.transmit_interval();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut tick: u64 = 0;
            loop {
                interval.tick().await;
                tick += 1;
                let record = assembler.assemble();
                debug!("Tick {}: assembled record {}", tick, record.timestamp);

                let transmitter = transmitter.clone();
                let reports = reports.clone();
                tokio::spawn(async move {
                    let outcome = transmitter.send(&record).await;
                    // no receiver is fine
                    let _ = reports.send(TickReport {
                        tick,
                        timestamp: record.timestamp,
                        outcome,
                    });
                });
            }
        })
    }

    pub async fn state(&self) -> SessionState {
        self.lifecycle.lock().await.state
    }

    pub async fn is_timer_running(&self) -> bool {
        self.lifecycle
            .lock()
            .await
            .timer
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    pub async fn health(&self) -> SessionHealth {
        SessionHealth {
            state: self.state().await,
            location: self.location.status(),
            transmission: self.transmitter.stats(),
        }
    }

    /// Stream of per-tick outcomes. Only reports produced after subscribing are received.
    pub fn subscribe_reports(&self) -> broadcast::Receiver<TickReport> {
        self.reports.subscribe()
    }

    pub fn accelerometer(&self) -> &SensorStream {
        &self.accelerometer
    }

    pub fn gyroscope(&self) -> &SensorStream {
        &self.gyroscope
    }

    pub fn location(&self) -> &LocationStream {
        &self.location
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(timer) = self.lifecycle.get_mut().timer.take() {
            warn!("Sampling session dropped while active, cancelling timer");
            timer.abort();
        }
    }
}
