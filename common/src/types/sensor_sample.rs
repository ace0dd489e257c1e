use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::N_XYZ_COORDINATES;

/// Three axis reading from a motion sensor.
///
/// The all-zero default doubles as the "no data" value held by a stream before its
/// first push.
///
/// # Examples
///
/// ```
/// use common::types::SensorSample;
///
/// let sample = SensorSample::new([0.1, 0.2, 9.8]);
/// assert_eq!(sample.z(), 9.8);
/// assert_eq!(
///     serde_json::to_string(&sample).unwrap(),
///     r#"{"x":0.1,"y":0.2,"z":9.8}"#
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Axes", into = "Axes")]
pub struct SensorSample(Vector3<f64>);

#[derive(Serialize, Deserialize)]
struct Axes {
    x: f64,
    y: f64,
    z: f64,
}

impl SensorSample {
    pub fn new(data: [f64; N_XYZ_COORDINATES]) -> Self {
        Self(Vector3::from(data))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn inner(&self) -> [f64; N_XYZ_COORDINATES] {
        [self.0.x, self.0.y, self.0.z]
    }
}

impl From<[f64; N_XYZ_COORDINATES]> for SensorSample {
    fn from(value: [f64; N_XYZ_COORDINATES]) -> Self {
        Self::new(value)
    }
}

impl From<SensorSample> for [f64; N_XYZ_COORDINATES] {
    fn from(value: SensorSample) -> Self {
        value.inner()
    }
}

impl TryFrom<Vec<f64>> for SensorSample {
    type Error = &'static str;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        if value.len() != N_XYZ_COORDINATES {
            return Err("Can't convert to SensorSample");
        }
        Ok(Self(Vector3::from_vec(value)))
    }
}

impl From<Axes> for SensorSample {
    fn from(value: Axes) -> Self {
        Self::new([value.x, value.y, value.z])
    }
}

impl From<SensorSample> for Axes {
    fn from(value: SensorSample) -> Self {
        Axes {
            x: value.x(),
            y: value.y(),
            z: value.z(),
        }
    }
}
