//! At rest: only gravity and the reference magnetic field are visible.

use super::{Kinematics, level_sample};
use crate::types::ImuSample;

/// Sensor at rest, level, facing north
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stationary;

impl Kinematics for Stationary {
    fn compute(&self, _t: f64) -> ImuSample {
        level_sample(0.0)
    }
}
