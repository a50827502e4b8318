use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::Error;

/// Per-period return model: independent normal draws around a fixed mean.
/// The random source is injected so tests (and the projector's per-trial
/// RNGs) can reproduce exact paths.
#[derive(Debug, Clone, Copy)]
pub struct ReturnModel {
    mean: f64,
    std_dev: f64,
    dist: Normal<f64>,
}

impl ReturnModel {
    /// `mean` and `std_dev` are per-period fractions (0.01 = 1 % per period).
    /// A zero `std_dev` is legal and degenerates to the constant mean.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, Error> {
        if !mean.is_finite() {
            return Err(Error::InvalidParameter {
                name: "mean_per_period",
                value: mean,
                detail: "must be finite",
            });
        }
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(Error::InvalidParameter {
                name: "std_dev_per_period",
                value: std_dev,
                detail: "must be >= 0",
            });
        }
        let dist = Normal::new(mean, std_dev).map_err(|_| Error::InvalidParameter {
            name: "std_dev_per_period",
            value: std_dev,
            detail: "rejected by Normal",
        })?;
        Ok(ReturnModel { mean, std_dev, dist })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Draw one simulated return sequence, one variate per period.
    pub fn sample_path(&self, periods: usize, rng: &mut impl Rng) -> Vec<f64> {
        (0..periods).map(|_| self.dist.sample(rng)).collect()
    }
}
