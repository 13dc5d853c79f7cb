//! Constant-velocity cruising on a straight road
//!
//! Net forward acceleration is zero, but the accelerometer still sees road
//! coupling: a vertical buzz at the wheel rotation frequency and a weaker
//! fore-aft component at twice that frequency. Both scale with speed, so a
//! cruise at 0 m/s reads exactly like [`Stationary`](super::Stationary).

use std::f64::consts::TAU;

use super::{GRAVITY, Kinematics, MAG_REFERENCE};
use crate::error::{Error, Result};
use crate::types::ImuSample;

/// Rolling circumference of a 700c road wheel (m)
const WHEEL_CIRCUMFERENCE: f64 = 2.1;

/// Vertical buzz amplitude per m/s of speed (m/s² per m/s)
const ROAD_COUPLING: f64 = 0.05;

/// Fore-aft amplitude relative to the vertical buzz
const FORE_AFT_RATIO: f64 = 0.2;

/// Straight-line cruise at constant speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cruise {
    speed: f64,
}

impl Cruise {
    /// # Arguments
    /// * `speed` - m/s, must be >= 0
    pub fn new(speed: f64) -> Result<Self> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(Error::Domain(format!(
                "cruise speed must be >= 0, got {}",
                speed
            )));
        }
        Ok(Self { speed })
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Wheel rotation frequency (Hz)
    pub fn wheel_frequency(&self) -> f64 {
        self.speed / WHEEL_CIRCUMFERENCE
    }

    /// Vertical buzz amplitude (m/s²)
    pub fn buzz_amplitude(&self) -> f64 {
        ROAD_COUPLING * self.speed
    }
}

impl Kinematics for Cruise {
    fn compute(&self, t: f64) -> ImuSample {
        let amplitude = self.buzz_amplitude();
        let phase = TAU * self.wheel_frequency() * t;
        ImuSample::unstamped(
            [
                FORE_AFT_RATIO * amplitude * (2.0 * phase).sin(),
                0.0,
                -GRAVITY + amplitude * phase.sin(),
            ],
            [0.0, 0.0, 0.0],
            MAG_REFERENCE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Scenario, Stationary};

    #[test]
    fn test_zero_speed_matches_stationary() {
        let cruise = Cruise::new(0.0).unwrap();
        for i in 0..50 {
            let t = i as f64 * 0.037;
            assert_eq!(cruise.compute(t), Stationary.compute(t));
        }
    }

    #[test]
    fn test_cruise_shows_road_coupling() {
        let cruise = Cruise::new(10.0).unwrap();
        let scenario = Scenario::new(2.0, 100.0, cruise).unwrap();
        let samples = scenario.generate(0.0);

        let amplitude = cruise.buzz_amplitude();
        assert_eq!(amplitude, 0.5);
        assert!(samples.iter().any(|s| s.accel_x() != 0.0));
        for s in &samples {
            assert!((s.accel_z() + GRAVITY).abs() <= amplitude + 1e-12);
            assert!(s.accel_x().abs() <= FORE_AFT_RATIO * amplitude + 1e-12);
            assert_eq!(s.gyro, [0.0, 0.0, 0.0]);
        }

        // Zero-mean buzz: averages out over whole wheel revolutions
        let mean_x: f64 = samples.iter().map(|s| s.accel_x()).sum::<f64>() / samples.len() as f64;
        assert!(mean_x.abs() < 0.05, "mean accel_x={}", mean_x);
    }

    #[test]
    fn test_negative_speed_is_domain_error() {
        assert!(matches!(Cruise::new(-1.0), Err(Error::Domain(_))));
    }
}
