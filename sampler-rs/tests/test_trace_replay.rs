use std::sync::Arc;
use std::time::Duration;

use sampler_rs::adapters::mock::{MockResponse, SimulatedLocation, SimulatedSensor, TransportMock};
use sampler_rs::{SamplerConfig, SessionController};
use test_utils::{load_trace, TRACE_PATH};

#[tokio::test]
async fn test_replayed_trace_is_sampled_once_location_is_fixed() {
    let trace = load_trace(TRACE_PATH).unwrap();

    let accelerometer = Arc::new(SimulatedSensor::new());
    let gyroscope = Arc::new(SimulatedSensor::new());
    let location = Arc::new(SimulatedLocation::new());
    let transport = Arc::new(TransportMock::new(MockResponse::Status(200)));
    let config = SamplerConfig {
        transmit_interval_ms: 100,
        sensor_interval_ms: 10,
        ..SamplerConfig::default()
    };
    let controller = SessionController::new(
        config,
        accelerometer.clone(),
        gyroscope.clone(),
        location.clone(),
        transport.clone(),
    )
    .unwrap();

    controller.start().await.unwrap();
    let started = tokio::time::Instant::now();
    for row in &trace {
        // half a period ahead of each tick
        tokio::time::sleep_until(started + Duration::from_millis(row.offset_ms + 50)).await;
        if let Some(fix) = row.location {
            location.push(fix);
        }
        accelerometer.push(row.accelerometer);
        gyroscope.push(row.gyroscope);
    }
    tokio::time::sleep(Duration::from_millis(120)).await;
    controller.stop().await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let received = transport.received();
    assert!(!received.is_empty());
    for record in &received {
        let fix = record.location.expect("sent without location");
        assert!(trace.iter().any(|row| row.location == Some(fix)));
        assert!(trace.iter().any(|row| row.accelerometer == record.accelerometer));
        assert!(trace.iter().any(|row| row.gyroscope == record.gyroscope));
    }

    // ticks before the first fix are skipped
    let stats = controller.health().await.transmission;
    assert!(stats.skipped_no_location >= 1);
    assert_eq!(stats.delivered as usize, received.len());
}
