//! Kinematic scenarios
//!
//! A scenario is a known maneuver (standing still, accelerating, cornering, ...)
//! that computes an IMU sample as a pure function of time since the scenario
//! started. Scenarios hold no state besides their construction parameters, so
//! the same scenario can be sampled any number of times, in any order.
//!
//! # Structure
//!
//! ```text
//! Scenario
//! ├── duration, sample_rate        # Timing (validated > 0)
//! └── Motion                       # Per-sample physics
//!     ├── Stationary
//!     ├── Acceleration
//!     ├── Cruise
//!     ├── Corner
//!     ├── Braking
//!     └── Vibration ── Box<Motion> # Overlay on another motion
//! ```
//!
//! # Sampling
//!
//! `Scenario::generate(start)` yields `⌊duration × sample_rate⌋` samples. Sample
//! `i` is computed at local time `i × dt` and stamped `start + i × dt`.
//! [`Scenario::samples`] is the lazy form of the same sequence.

mod acceleration;
mod braking;
mod corner;
mod cruise;
mod stationary;
mod vibration;

pub use acceleration::Acceleration;
pub use braking::Braking;
pub use corner::{Corner, Direction};
pub use cruise::Cruise;
pub use stationary::Stationary;
pub use vibration::Vibration;

use crate::error::{Result, ensure_positive};
use crate::types::ImuSample;

/// Gravitational acceleration (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Magnetometer reading for a level, north-facing sensor (μT)
pub const MAG_REFERENCE: [f64; 3] = [20.0, 0.0, -40.0];

/// Per-sample physics of a maneuver
pub trait Kinematics {
    /// Compute the sample at `t` seconds after the maneuver started.
    ///
    /// The returned timestamp is a placeholder; callers stamp it onto their
    /// own timeline.
    fn compute(&self, t: f64) -> ImuSample;
}

/// Level, heading-fixed sample with the given forward acceleration
#[inline]
pub(crate) fn level_sample(accel_x: f64) -> ImuSample {
    ImuSample::unstamped([accel_x, 0.0, -GRAVITY], [0.0, 0.0, 0.0], MAG_REFERENCE)
}

/// Closed set of maneuver physics
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    Stationary(Stationary),
    Acceleration(Acceleration),
    Cruise(Cruise),
    Corner(Corner),
    Braking(Braking),
    Vibration(Vibration),
}

impl Motion {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Motion::Stationary(_) => "stationary",
            Motion::Acceleration(_) => "acceleration",
            Motion::Cruise(_) => "cruise",
            Motion::Corner(_) => "cornering",
            Motion::Braking(_) => "braking",
            Motion::Vibration(_) => "vibration",
        }
    }
}

impl Kinematics for Motion {
    fn compute(&self, t: f64) -> ImuSample {
        match self {
            Motion::Stationary(m) => m.compute(t),
            Motion::Acceleration(m) => m.compute(t),
            Motion::Cruise(m) => m.compute(t),
            Motion::Corner(m) => m.compute(t),
            Motion::Braking(m) => m.compute(t),
            Motion::Vibration(m) => m.compute(t),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Motion {
                fn from(m: $variant) -> Self {
                    Motion::$variant(m)
                }
            }
        )*
    };
}

impl_from_variant!(Stationary, Acceleration, Cruise, Corner, Braking, Vibration);

/// A maneuver with timing, ready to be sampled
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    duration: f64,
    sample_rate: f64,
    motion: Motion,
}

impl Scenario {
    /// Create a scenario
    ///
    /// # Errors
    /// `Error::Config` if `duration` or `sample_rate` is not strictly positive.
    pub fn new(duration: f64, sample_rate: f64, motion: impl Into<Motion>) -> Result<Self> {
        ensure_positive("duration", duration)?;
        ensure_positive("sample_rate", sample_rate)?;
        Ok(Self {
            duration,
            sample_rate,
            motion: motion.into(),
        })
    }

    /// Stationary scenario shorthand
    pub fn stationary(duration: f64, sample_rate: f64) -> Result<Self> {
        Self::new(duration, sample_rate, Stationary)
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Sample period in seconds
    pub fn dt(&self) -> f64 {
        1.0 / self.sample_rate
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn name(&self) -> &'static str {
        self.motion.name()
    }

    /// Number of samples this scenario produces: `⌊duration × sample_rate⌋`
    pub fn sample_count(&self) -> usize {
        (self.duration * self.sample_rate).floor() as usize
    }

    /// Physics at local time `t` (placeholder timestamp)
    pub fn compute(&self, t: f64) -> ImuSample {
        self.motion.compute(t)
    }

    /// Lazily sample the scenario, stamping samples from `start_time`
    pub fn samples(&self, start_time: f64) -> ScenarioSamples<'_> {
        ScenarioSamples {
            scenario: self,
            start_time,
            dt: self.dt(),
            index: 0,
            count: self.sample_count(),
        }
    }

    /// Eagerly sample the scenario, stamping samples from `start_time`
    pub fn generate(&self, start_time: f64) -> Vec<ImuSample> {
        self.samples(start_time).collect()
    }
}

/// Lazy sample sequence of one scenario
///
/// Restart by calling [`Scenario::samples`] again.
#[derive(Debug, Clone)]
pub struct ScenarioSamples<'a> {
    scenario: &'a Scenario,
    start_time: f64,
    dt: f64,
    index: usize,
    count: usize,
}

impl Iterator for ScenarioSamples<'_> {
    type Item = ImuSample;

    fn next(&mut self) -> Option<ImuSample> {
        if self.index >= self.count {
            return None;
        }
        let t = self.index as f64 * self.dt;
        self.index += 1;
        Some(self.scenario.compute(t).with_timestamp(self.start_time + t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ScenarioSamples<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_stationary_five_seconds_at_100hz() {
        let scenario = Scenario::stationary(5.0, 100.0).unwrap();
        let samples = scenario.generate(0.0);

        assert_eq!(samples.len(), 500);
        for s in &samples {
            assert_eq!(s.accel, [0.0, 0.0, -9.81]);
            assert_eq!(s.gyro, [0.0, 0.0, 0.0]);
            assert_eq!(s.mag, MAG_REFERENCE);
        }
    }

    #[test]
    fn test_timestamps_are_arithmetic_progression() {
        let corner = Corner::new(10.0, 20.0, Direction::Left).unwrap();
        let scenario = Scenario::new(2.5, 50.0, corner).unwrap();
        let t0 = 12.0;
        let samples = scenario.generate(t0);

        assert_eq!(samples.len(), 125);
        let dt = scenario.dt();
        for (i, s) in samples.iter().enumerate() {
            assert_eq!(s.timestamp, t0 + i as f64 * dt, "sample {}", i);
        }
    }

    #[test]
    fn test_sample_count_floors() {
        // 0.999 s at 100 Hz = 99.9 samples -> 99
        let scenario = Scenario::stationary(0.999, 100.0).unwrap();
        assert_eq!(scenario.sample_count(), 99);
        assert_eq!(scenario.generate(0.0).len(), 99);

        // Shorter than one period yields nothing
        let tiny = Scenario::stationary(0.004, 100.0).unwrap();
        assert!(tiny.generate(0.0).is_empty());
    }

    #[test]
    fn test_invalid_timing_rejected() {
        assert!(matches!(
            Scenario::stationary(0.0, 100.0),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Scenario::stationary(-1.0, 100.0),
            Err(Error::Config(_))
        ));
        assert!(matches!(Scenario::stationary(5.0, 0.0), Err(Error::Config(_))));
        assert!(matches!(
            Scenario::stationary(5.0, -50.0),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_lazy_matches_eager() {
        let accel = Acceleration::new(10.0, 2.0).unwrap();
        let vib = Vibration::new(accel, 15.0, 2.0).unwrap();
        let scenario = Scenario::new(3.0, 200.0, vib).unwrap();

        let lazy = scenario.samples(1.0);
        assert_eq!(lazy.len(), 600);
        let lazy: Vec<_> = lazy.collect();
        assert_eq!(lazy, scenario.generate(1.0));
    }

    #[test]
    fn test_compute_is_order_independent() {
        let corner = Corner::new(8.0, 15.0, Direction::Right).unwrap();
        let scenario = Scenario::new(4.0, 100.0, corner).unwrap();

        let late = scenario.compute(3.2);
        let _ = scenario.compute(0.1);
        assert_eq!(scenario.compute(3.2), late);
    }

    #[test]
    fn test_motion_names() {
        assert_eq!(Motion::from(Stationary).name(), "stationary");
        assert_eq!(
            Motion::from(Braking::new(10.0, 2.5).unwrap()).name(),
            "braking"
        );
    }
}
