//! Sensor noise injection
//!
//! Provides Gaussian noise generation with deterministic seeding and a noise
//! model that perturbs every channel of a generated sample stream.
//!
//! | Channel | Standard deviation |
//! |---------|--------------------|
//! | Accelerometer | `accel_stddev` (m/s²) |
//! | Gyroscope | `accel_stddev / 5` unless overridden (rad/s) |
//! | Magnetometer | fixed 0.5 µT |
//!
//! There is no global generator: every transform takes the [`NoiseGenerator`]
//! it draws from, so a seed fully determines the output.

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::StandardNormal;

use crate::error::{Error, Result};
use crate::types::ImuSample;

/// Magnetometer noise standard deviation (μT), independent of configuration
pub const MAG_NOISE_STDDEV: f64 = 0.5;

/// Default accelerometer noise standard deviation (m/s²)
pub const DEFAULT_ACCEL_STDDEV: f64 = 0.05;

/// Gyro noise is derived from accel noise by this divisor unless overridden
const GYRO_STDDEV_DIVISOR: f64 = 5.0;

/// Noise generator with explicit seed for reproducibility
#[derive(Clone)]
pub struct NoiseGenerator {
    rng: SmallRng,
}

impl NoiseGenerator {
    /// Create a new noise generator from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generate Gaussian noise with given standard deviation
    #[inline]
    pub fn gaussian(&mut self, stddev: f64) -> f64 {
        if stddev == 0.0 {
            return 0.0;
        }
        let n: f64 = self.rng.sample(StandardNormal);
        n * stddev
    }

    #[inline]
    fn perturb(&mut self, axes: [f64; 3], stddev: f64) -> [f64; 3] {
        [
            axes[0] + self.gaussian(stddev),
            axes[1] + self.gaussian(stddev),
            axes[2] + self.gaussian(stddev),
        ]
    }
}

/// Per-channel noise levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseModel {
    accel_stddev: f64,
    gyro_stddev: f64,
}

impl NoiseModel {
    /// Noise model with gyro noise derived as `accel_stddev / 5`
    pub fn new(accel_stddev: f64) -> Result<Self> {
        validate_stddev("accel noise", accel_stddev)?;
        Ok(Self {
            accel_stddev,
            gyro_stddev: accel_stddev / GYRO_STDDEV_DIVISOR,
        })
    }

    /// Override the derived gyro noise level
    pub fn with_gyro_stddev(mut self, gyro_stddev: f64) -> Result<Self> {
        validate_stddev("gyro noise", gyro_stddev)?;
        self.gyro_stddev = gyro_stddev;
        Ok(self)
    }

    /// Model that leaves samples untouched
    pub fn disabled() -> Self {
        Self {
            accel_stddev: 0.0,
            gyro_stddev: 0.0,
        }
    }

    pub fn accel_stddev(&self) -> f64 {
        self.accel_stddev
    }

    pub fn gyro_stddev(&self) -> f64 {
        self.gyro_stddev
    }

    /// Magnetometer noise level, fixed at [`MAG_NOISE_STDDEV`]
    pub fn mag_stddev(&self) -> f64 {
        MAG_NOISE_STDDEV
    }

    /// True when the model has no accel or gyro noise.
    ///
    /// A silent model is the identity transform: magnetometer noise is not
    /// applied either and no random numbers are drawn.
    pub fn is_silent(&self) -> bool {
        self.accel_stddev == 0.0 && self.gyro_stddev == 0.0
    }

    /// Perturb one sample. Timestamp is preserved.
    pub fn apply(&self, sample: ImuSample, noise: &mut NoiseGenerator) -> ImuSample {
        if self.is_silent() {
            return sample;
        }
        ImuSample {
            timestamp: sample.timestamp,
            accel: noise.perturb(sample.accel, self.accel_stddev),
            gyro: noise.perturb(sample.gyro, self.gyro_stddev),
            mag: noise.perturb(sample.mag, MAG_NOISE_STDDEV),
        }
    }

    /// Lazily perturb a sample stream
    pub fn apply_iter<'n, I>(&self, samples: I, noise: &'n mut NoiseGenerator) -> NoisySamples<'n, I>
    where
        I: Iterator<Item = ImuSample>,
    {
        NoisySamples {
            inner: samples,
            model: *self,
            noise,
        }
    }
}

impl Default for NoiseModel {
    fn default() -> Self {
        Self {
            accel_stddev: DEFAULT_ACCEL_STDDEV,
            gyro_stddev: DEFAULT_ACCEL_STDDEV / GYRO_STDDEV_DIVISOR,
        }
    }
}

fn validate_stddev(name: &str, stddev: f64) -> Result<()> {
    if stddev.is_finite() && stddev >= 0.0 {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "{} standard deviation must be >= 0, got {}",
            name, stddev
        )))
    }
}

/// Perturb a complete sample stream, preserving count, order and timestamps
pub fn add_noise(
    samples: &[ImuSample],
    model: &NoiseModel,
    noise: &mut NoiseGenerator,
) -> Vec<ImuSample> {
    samples.iter().map(|s| model.apply(*s, noise)).collect()
}

/// Iterator adapter returned by [`NoiseModel::apply_iter`]
pub struct NoisySamples<'n, I> {
    inner: I,
    model: NoiseModel,
    noise: &'n mut NoiseGenerator,
}

impl<I> Iterator for NoisySamples<'_, I>
where
    I: Iterator<Item = ImuSample>,
{
    type Item = ImuSample;

    fn next(&mut self) -> Option<ImuSample> {
        let sample = self.inner.next()?;
        Some(self.model.apply(sample, self.noise))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
