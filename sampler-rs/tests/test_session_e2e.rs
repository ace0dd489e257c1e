use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::timeout;

use common::{Coordinate, SensorSample};
use sampler_rs::adapters::mock::{SimulatedLocation, SimulatedSensor};
use sampler_rs::{SamplerConfig, SendOutcome, SessionController, TickReport};
use test_utils::IngestMock;

struct Device {
    accelerometer: Arc<SimulatedSensor>,
    gyroscope: Arc<SimulatedSensor>,
    location: Arc<SimulatedLocation>,
    controller: SessionController,
}

fn device(endpoint: &str, transmit_interval_ms: u64) -> Device {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = SamplerConfig {
        transmit_interval_ms,
        sensor_interval_ms: 10,
        send_timeout_ms: 500,
        ..SamplerConfig::with_endpoint(endpoint)
    };
    let accelerometer = Arc::new(SimulatedSensor::new());
    let gyroscope = Arc::new(SimulatedSensor::new());
    let location = Arc::new(SimulatedLocation::new());
    let controller = SessionController::with_http(
        config,
        accelerometer.clone(),
        gyroscope.clone(),
        location.clone(),
    )
    .unwrap();
    Device {
        accelerometer,
        gyroscope,
        location,
        controller,
    }
}

async fn next_report(reports: &mut broadcast::Receiver<TickReport>) -> TickReport {
    timeout(Duration::from_secs(2), reports.recv())
        .await
        .expect("no tick report")
        .unwrap()
}

fn parse(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .unwrap()
        .with_timezone(&Utc)
}

#[tokio::test]
async fn test_one_tick_posts_latest_values() {
    let mock = IngestMock::start().await;
    let device = device(&mock.uri(), 200);

    let before = Utc::now();
    device.controller.start().await.unwrap();
    device.accelerometer.push(SensorSample::new([0.1, 0.2, 9.8]));
    device.gyroscope.push(SensorSample::new([0.0, 0.01, 0.0]));
    device.location.push(Coordinate::new(37.0, -122.0, 5.0));

    tokio::time::sleep(Duration::from_millis(300)).await;
    device.controller.stop().await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    let after = Utc::now();

    let records = mock.records().await;
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.accelerometer, SensorSample::new([0.1, 0.2, 9.8]));
    assert_eq!(record.gyroscope, SensorSample::new([0.0, 0.01, 0.0]));
    assert_eq!(record.location, Some(Coordinate::new(37.0, -122.0, 5.0)));

    assert!(record.timestamp.ends_with('Z'));
    let sent_at = parse(&record.timestamp);
    assert!(sent_at >= before.trunc_subsecs(3) && sent_at <= after);
}

#[tokio::test]
async fn test_nothing_posted_without_location() {
    let mock = IngestMock::start().await;
    let device = device(&mock.uri(), 30);
    let mut reports = device.controller.subscribe_reports();

    device.controller.start().await.unwrap();
    device.accelerometer.push(SensorSample::new([0.1, 0.2, 9.8]));
    device.gyroscope.push(SensorSample::new([0.0, 0.01, 0.0]));

    for _ in 0..5 {
        let report = next_report(&mut reports).await;
        assert_eq!(report.outcome, SendOutcome::SkippedNoLocation);
    }
    device.controller.stop().await;

    assert_eq!(mock.post_count().await, 0);
    let health = device.controller.health().await;
    assert!(health.transmission.skipped_no_location >= 5);
    assert_eq!(health.transmission.delivered, 0);
}

#[tokio::test]
async fn test_server_error_is_not_retried_and_next_tick_sends() {
    let mock = IngestMock::failing_first(500, 1).await;
    let device = device(&mock.uri(), 50);
    let mut reports = device.controller.subscribe_reports();

    device.controller.start().await.unwrap();
    device.location.push(Coordinate::new(37.0, -122.0, 5.0));

    let first = next_report(&mut reports).await;
    let second = next_report(&mut reports).await;
    device.controller.stop().await;

    assert_eq!(first.outcome, SendOutcome::Rejected(500));
    assert_eq!(second.outcome, SendOutcome::Delivered(200));
    assert_eq!(second.tick, first.tick + 1);

    // one request per tick, the failed record is not resent
    tokio::time::sleep(Duration::from_millis(20)).await;
    let records = mock.records().await;
    assert!(records.len() >= 2);
    assert_ne!(records[0].timestamp, records[1].timestamp);
}

#[tokio::test]
async fn test_no_posts_after_stop() {
    let mock = IngestMock::start().await;
    let device = device(&mock.uri(), 30);
    let mut reports = device.controller.subscribe_reports();

    device.controller.start().await.unwrap();
    device.location.push(Coordinate::new(37.0, -122.0, 5.0));
    assert!(next_report(&mut reports).await.outcome.is_delivered());
    device.controller.stop().await;

    tokio::time::sleep(Duration::from_millis(50)).await;
    let posted = mock.post_count().await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(mock.post_count().await, posted);
    assert!(!device.controller.is_timer_running().await);
}
