//! Straight-line acceleration from rest to a target speed, then coasting.

use super::{Kinematics, level_sample};
use crate::error::{Error, Result};
use crate::types::ImuSample;

/// Constant forward acceleration until `target_speed` is reached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acceleration {
    target_speed: f64,
    accel_rate: f64,
    accel_time: f64,
}

impl Acceleration {
    /// # Arguments
    /// * `target_speed` - m/s (10 m/s ≈ 36 km/h)
    /// * `accel_rate` - m/s², must be > 0
    pub fn new(target_speed: f64, accel_rate: f64) -> Result<Self> {
        if !(accel_rate.is_finite() && accel_rate > 0.0) {
            return Err(Error::Domain(format!(
                "acceleration rate must be > 0, got {}",
                accel_rate
            )));
        }
        if !target_speed.is_finite() || target_speed < 0.0 {
            return Err(Error::Domain(format!(
                "target speed must be >= 0, got {}",
                target_speed
            )));
        }
        Ok(Self {
            target_speed,
            accel_rate,
            accel_time: target_speed / accel_rate,
        })
    }

    pub fn target_speed(&self) -> f64 {
        self.target_speed
    }

    pub fn accel_rate(&self) -> f64 {
        self.accel_rate
    }

    /// Seconds spent accelerating before coasting
    pub fn accel_time(&self) -> f64 {
        self.accel_time
    }
}

impl Kinematics for Acceleration {
    fn compute(&self, t: f64) -> ImuSample {
        let accel_x = if t < self.accel_time {
            self.accel_rate
        } else {
            0.0
        };
        level_sample(accel_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{GRAVITY, Scenario};

    #[test]
    fn test_ramp_then_coast() {
        let accel = Acceleration::new(10.0, 2.0).unwrap();
        assert_eq!(accel.accel_time(), 5.0);

        let scenario = Scenario::new(8.0, 100.0, accel).unwrap();
        let dt = scenario.dt();
        for (i, s) in scenario.generate(0.0).iter().enumerate() {
            let t = i as f64 * dt;
            if t < 5.0 {
                assert_eq!(s.accel_x(), 2.0, "t={}", t);
            } else {
                assert_eq!(s.accel_x(), 0.0, "t={}", t);
            }
            assert_eq!(s.accel_y(), 0.0);
            assert_eq!(s.accel_z(), -GRAVITY);
            assert_eq!(s.gyro, [0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_zero_rate_is_domain_error() {
        assert!(matches!(
            Acceleration::new(10.0, 0.0),
            Err(Error::Domain(_))
        ));
        assert!(Acceleration::new(10.0, -1.0).is_err());
        assert!(Acceleration::new(-3.0, 1.0).is_err());
    }
}
