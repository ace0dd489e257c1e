use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use common::SourceError;

/// Functionality to add some Gaussian noise.
#[derive(Clone, Debug)]
pub struct GaussianNoise {
    normal: Normal<f64>,
}

impl GaussianNoise {
    /// Creates new distribution from mean and stdev.
    /// Returns InvalidOptions if stdev is negative or not finite.
    pub fn new(mean: f64, stdev: f64) -> Result<Self, SourceError> {
        if !stdev.is_finite() || stdev < 0.0 {
            return Err(SourceError::InvalidOptions(format!(
                "noise stdev {} must be finite and non negative",
                stdev
            )));
        }
        let normal = Normal::new(mean, stdev)
            .map_err(|e| SourceError::InvalidOptions(format!("noise stdev {}: {}", stdev, e)))?;
        Ok(Self { normal })
    }

    /// Sample from distribution
    pub fn draw_sample(&self, rng: &mut StdRng) -> f64 {
        self.normal.sample(rng)
    }

    /// Adds noise to every component
    pub fn add_noise<const N: usize>(&self, rng: &mut StdRng, data: [f64; N]) -> [f64; N] {
        data.map(|d| d + self.draw_sample(rng))
    }
}
