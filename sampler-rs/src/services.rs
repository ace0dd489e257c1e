use log::error;
use std::sync::Arc;
use tokio::sync::Notify;

use common::Coordinate;

use crate::adapters::mock::{GaussianNoise, SimulatedLocation, SimulatedSensor};
use crate::constants::{
    MOCK_AT_REST, MOCK_GRAVITY, MOCK_LOCATION_STDEV_DEG, MOCK_ORIGIN, MOCK_SENSOR_STDEV,
};
use crate::models::config::SamplerConfig;
use crate::models::errors::SamplerError;
use crate::models::shutdown;
use crate::session::SessionController;
use crate::streams::{SharedLocationSource, SharedSensorSource};

/// Starts a sampling session posting to the configured endpoint in a background task.
///
/// The session stops on Ctrl+C, or after `run_for_millis` when given, and the task then
/// finishes.
///
/// An error ClientBuild is returned if the http client can't be created, and a Config
/// error if the configuration is invalid.
///
/// # Returns
///
/// Returns a tuple containing:
/// * A `tokio::task::JoinHandle<()>` representing the spawned asynchronous task.
/// * An `Arc<SessionController>` instance, allowing further interaction with the session.
pub fn run_session(
    config: SamplerConfig,
    accelerometer: SharedSensorSource,
    gyroscope: SharedSensorSource,
    location: SharedLocationSource,
    run_for_millis: Option<u64>,
) -> Result<(tokio::task::JoinHandle<()>, Arc<SessionController>), SamplerError> {
    let controller = Arc::new(SessionController::with_http(
        config,
        accelerometer,
        gyroscope,
        location,
    )?);

    let handle = tokio::spawn({
        let controller = controller.clone();
        async move {
            if let Err(e) = controller.start().await {
                error!("Error starting sampling session: {}", e);
                return;
            }
            let stop_signal = Arc::new(Notify::new());
            shutdown::listen_for_shutdown(stop_signal.clone(), run_for_millis);
            stop_signal.notified().await;
            controller.stop().await;
        }
    });
    Ok((handle, controller))
}

/// Starts a session fed by simulated sensors: a device lying flat and still, located
/// around a fixed origin.
///
/// Returns a tuple containing:
/// - A `tokio::task::JoinHandle<()>` representing the spawned asynchronous task.
/// - An `Arc<SessionController>` instance, allowing further interaction with the session.
pub fn run_mock_session(
    config: SamplerConfig,
    add_sensor_noise: bool,
    run_for_millis: u64,
) -> Result<(tokio::task::JoinHandle<()>, Arc<SessionController>), SamplerError> {
    let (sensor_stdev, location_stdev) = if add_sensor_noise {
        (MOCK_SENSOR_STDEV, MOCK_LOCATION_STDEV_DEG)
    } else {
        (0.0, 0.0)
    };
    let (latitude, longitude, accuracy) = MOCK_ORIGIN;

    let accelerometer = Arc::new(SimulatedSensor::with_noise(
        MOCK_GRAVITY,
        GaussianNoise::new(0.0, sensor_stdev)?,
    ));
    let gyroscope = Arc::new(SimulatedSensor::with_noise(
        MOCK_AT_REST,
        GaussianNoise::new(0.0, sensor_stdev)?,
    ));
    let location = Arc::new(SimulatedLocation::with_noise(
        Coordinate::new(latitude, longitude, accuracy),
        GaussianNoise::new(0.0, location_stdev)?,
    ));

    run_session(
        config,
        accelerometer,
        gyroscope,
        location,
        Some(run_for_millis),
    )
}
