//! Road vibration overlay on another motion

use std::f64::consts::TAU;

use super::{Kinematics, Motion};
use crate::error::{Error, Result};
use crate::types::ImuSample;

/// Sinusoidal vertical vibration added on top of a base motion
///
/// All channels come from the base motion; only `accel_z` is modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Vibration {
    base: Box<Motion>,
    frequency: f64,
    amplitude: f64,
}

impl Vibration {
    /// # Arguments
    /// * `base` - Underlying motion
    /// * `frequency` - Hz, typical road buzz is ~15 Hz
    /// * `amplitude` - m/s²
    pub fn new(base: impl Into<Motion>, frequency: f64, amplitude: f64) -> Result<Self> {
        if !frequency.is_finite() || frequency < 0.0 {
            return Err(Error::Domain(format!(
                "vibration frequency must be >= 0, got {}",
                frequency
            )));
        }
        if !amplitude.is_finite() {
            return Err(Error::Domain(format!(
                "vibration amplitude must be finite, got {}",
                amplitude
            )));
        }
        Ok(Self {
            base: Box::new(base.into()),
            frequency,
            amplitude,
        })
    }

    pub fn base(&self) -> &Motion {
        &self.base
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }
}

impl Kinematics for Vibration {
    fn compute(&self, t: f64) -> ImuSample {
        let mut sample = self.base.compute(t);
        sample.accel[2] += self.amplitude * (TAU * self.frequency * t).sin();
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Corner, Direction, GRAVITY, Stationary};
    use approx::assert_relative_eq;

    #[test]
    fn test_only_accel_z_modified() {
        let corner = Corner::new(10.0, 20.0, Direction::Left).unwrap();
        let vib = Vibration::new(corner, 15.0, 2.0).unwrap();

        for i in 0..100 {
            let t = i as f64 * 0.01;
            let base = corner.compute(t);
            let s = vib.compute(t);
            assert_eq!(s.accel[0], base.accel[0]);
            assert_eq!(s.accel[1], base.accel[1]);
            assert_eq!(s.gyro, base.gyro);
            assert_eq!(s.mag, base.mag);
            assert_relative_eq!(
                s.accel[2] - base.accel[2],
                2.0 * (TAU * 15.0 * t).sin(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_peak_at_quarter_period() {
        let vib = Vibration::new(Stationary, 10.0, 1.5).unwrap();
        // sin peaks at t = 1 / (4 f)
        let s = vib.compute(0.025);
        assert_relative_eq!(s.accel_z(), -GRAVITY + 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_nested_overlay() {
        let inner = Vibration::new(Stationary, 15.0, 2.0).unwrap();
        let outer = Vibration::new(inner.clone(), 3.0, 0.5).unwrap();
        let t = 0.13;
        assert_relative_eq!(
            outer.compute(t).accel_z(),
            inner.compute(t).accel_z() + 0.5 * (TAU * 3.0 * t).sin(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            Vibration::new(Stationary, -1.0, 2.0),
            Err(Error::Domain(_))
        ));
        assert!(Vibration::new(Stationary, 15.0, f64::NAN).is_err());
    }
}
