pub(crate) const DEFAULT_SENSOR_INTERVAL_MS: u64 = 1000;
pub(crate) const DEFAULT_TRANSMIT_INTERVAL_MS: u64 = 1000;
pub(crate) const DEFAULT_SEND_TIMEOUT_MS: u64 = 5000;
pub(crate) const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";

pub(crate) const MIN_SENSOR_INTERVAL_MS: u64 = 10;
pub(crate) const MIN_TRANSMIT_INTERVAL_MS: u64 = 10;

pub(crate) const REPORT_CHANNEL_CAPACITY: usize = 64;

pub(crate) const MOCK_GRAVITY: [f64; 3] = [0.0, 0.0, 9.81];
pub(crate) const MOCK_AT_REST: [f64; 3] = [0.0, 0.0, 0.0];
pub(crate) const MOCK_SENSOR_STDEV: f64 = 0.05;
pub(crate) const MOCK_ORIGIN: (f64, f64, f64) = (37.0, -122.0, 5.0);
// ~1 m in degrees
pub(crate) const MOCK_LOCATION_STDEV_DEG: f64 = 1e-5;
