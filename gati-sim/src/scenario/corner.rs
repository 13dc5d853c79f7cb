//! Constant-speed cornering on a circular arc
//!
//! Quasi-static model: the rider is assumed to lean instantly to the angle that
//! balances the centripetal force against gravity. No roll dynamics.
//!
//! ```text
//! lateral   = v² / r          (negated for right turns)
//! yaw_rate  = v / r           (negated for right turns)
//! lean      = atan2(lateral, g)
//! accel     = [g·sin(lean), lateral, -g·cos(lean)]
//! mag_xy    = 20 µT rotated by yaw_rate·t
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{GRAVITY, Kinematics, MAG_REFERENCE};
use crate::error::{Error, Result};
use crate::types::ImuSample;

/// Turn direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Left,
    Right,
}

impl Direction {
    /// +1 for left (CCW), -1 for right (CW)
    fn sign(self) -> f64 {
        match self {
            Direction::Left => 1.0,
            Direction::Right => -1.0,
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(Error::Config(format!(
                "unknown corner direction '{}' (expected left or right)",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Steady turn at constant speed and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    speed: f64,
    radius: f64,
    direction: Direction,
    lateral_accel: f64,
    yaw_rate: f64,
    lean_angle: f64,
}

impl Corner {
    /// # Arguments
    /// * `speed` - m/s through the corner
    /// * `radius` - turn radius in meters, must be > 0
    /// * `direction` - left or right
    ///
    /// # Errors
    /// `Error::Domain` for a zero, negative or non-finite radius.
    pub fn new(speed: f64, radius: f64, direction: Direction) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::Domain(format!(
                "corner radius must be > 0, got {}",
                radius
            )));
        }
        if !speed.is_finite() {
            return Err(Error::Domain(format!("corner speed must be finite, got {}", speed)));
        }

        let sign = direction.sign();
        let lateral_accel = sign * speed.powi(2) / radius;
        let yaw_rate = sign * speed / radius;
        let lean_angle = lateral_accel.atan2(GRAVITY);

        Ok(Self {
            speed,
            radius,
            direction,
            lateral_accel,
            yaw_rate,
            lean_angle,
        })
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Centripetal acceleration (m/s²), signed by direction
    pub fn lateral_accel(&self) -> f64 {
        self.lateral_accel
    }

    /// Heading rate (rad/s), CCW positive
    pub fn yaw_rate(&self) -> f64 {
        self.yaw_rate
    }

    /// Lean angle (rad)
    pub fn lean_angle(&self) -> f64 {
        self.lean_angle
    }
}

impl Kinematics for Corner {
    fn compute(&self, t: f64) -> ImuSample {
        let heading = self.yaw_rate * t;
        ImuSample::unstamped(
            [
                GRAVITY * self.lean_angle.sin(),
                self.lateral_accel,
                -GRAVITY * self.lean_angle.cos(),
            ],
            [0.0, 0.0, self.yaw_rate],
            [
                MAG_REFERENCE[0] * heading.cos(),
                MAG_REFERENCE[0] * heading.sin(),
                MAG_REFERENCE[2],
            ],
        )
    }
}
