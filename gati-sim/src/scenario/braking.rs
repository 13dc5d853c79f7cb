//! Deceleration from an initial speed to a stop.

use super::{Kinematics, level_sample};
use crate::error::{Error, Result};
use crate::types::ImuSample;

/// Constant deceleration until stopped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Braking {
    initial_speed: f64,
    decel_rate: f64,
    stop_time: f64,
}

impl Braking {
    /// # Arguments
    /// * `initial_speed` - m/s at the start of braking
    /// * `decel_rate` - m/s², positive magnitude
    pub fn new(initial_speed: f64, decel_rate: f64) -> Result<Self> {
        if !(decel_rate.is_finite() && decel_rate > 0.0) {
            return Err(Error::Domain(format!(
                "deceleration rate must be > 0, got {}",
                decel_rate
            )));
        }
        if !initial_speed.is_finite() || initial_speed < 0.0 {
            return Err(Error::Domain(format!(
                "initial speed must be >= 0, got {}",
                initial_speed
            )));
        }
        Ok(Self {
            initial_speed,
            decel_rate,
            stop_time: initial_speed / decel_rate,
        })
    }

    pub fn initial_speed(&self) -> f64 {
        self.initial_speed
    }

    pub fn decel_rate(&self) -> f64 {
        self.decel_rate
    }

    /// Seconds until the rider is stopped
    pub fn stop_time(&self) -> f64 {
        self.stop_time
    }
}

impl Kinematics for Braking {
    fn compute(&self, t: f64) -> ImuSample {
        let accel_x = if t < self.stop_time {
            -self.decel_rate
        } else {
            0.0
        };
        level_sample(accel_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brake_then_stopped() {
        let braking = Braking::new(10.0, 2.5).unwrap();
        assert_eq!(braking.stop_time(), 4.0);

        assert_eq!(braking.compute(0.0).accel_x(), -2.5);
        assert_eq!(braking.compute(3.99).accel_x(), -2.5);
        assert_eq!(braking.compute(4.0).accel_x(), 0.0);
        assert_eq!(braking.compute(6.0).accel_x(), 0.0);
    }

    #[test]
    fn test_zero_rate_is_domain_error() {
        assert!(matches!(Braking::new(10.0, 0.0), Err(Error::Domain(_))));
    }
}
