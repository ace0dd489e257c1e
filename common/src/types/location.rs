use serde::{Deserialize, Serialize};

/// Outcome of asking the user for access to the device location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Desired accuracy of location fixes, from coarsest to finest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyTier {
    Lowest,
    Low,
    Balanced,
    High,
    Highest,
    #[default]
    BestForNavigation,
}

/// Update policy applied when watching the location.
/// A fix is delivered once both the time and the distance thresholds are exceeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationPolicy {
    pub accuracy: AccuracyTier,
    pub time_interval_ms: u64,
    pub distance_interval_m: f64,
}

impl Default for LocationPolicy {
    fn default() -> Self {
        Self {
            accuracy: AccuracyTier::default(),
            time_interval_ms: 1000,
            distance_interval_m: 1.0,
        }
    }
}
