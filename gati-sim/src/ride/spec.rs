//! Parameterized scenario descriptions
//!
//! A [`ScenarioSpec`] is the configuration-side view of a scenario: a kind plus
//! its parameters, each with a default. Specs are turned into validated
//! [`Scenario`]s with [`ScenarioSpec::build`].
//!
//! ```toml
//! [[scenarios]]
//! type = "acceleration"
//! duration = 8.0
//! target_speed = 12.0
//! accel_rate = 1.5
//!
//! [[scenarios]]
//! type = "cornering"
//! speed = 12.0
//! radius = 15.0
//! direction = "left"       # duration defaults to 5 s
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ensure_positive};
use crate::scenario::{
    Acceleration, Braking, Corner, Cruise, Direction, Motion, Scenario, Stationary, Vibration,
};

/// Duration used when a spec does not name one (seconds)
pub const DEFAULT_SCENARIO_DURATION: f64 = 5.0;

/// Scenario kinds accepted in configuration and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    Stationary,
    Acceleration,
    Cruise,
    Cornering,
    Braking,
    Vibration,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 6] = [
        ScenarioKind::Stationary,
        ScenarioKind::Acceleration,
        ScenarioKind::Cruise,
        ScenarioKind::Cornering,
        ScenarioKind::Braking,
        ScenarioKind::Vibration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::Stationary => "stationary",
            ScenarioKind::Acceleration => "acceleration",
            ScenarioKind::Cruise => "cruise",
            ScenarioKind::Cornering => "cornering",
            ScenarioKind::Braking => "braking",
            ScenarioKind::Vibration => "vibration",
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stationary" => Ok(ScenarioKind::Stationary),
            "acceleration" => Ok(ScenarioKind::Acceleration),
            "cruise" => Ok(ScenarioKind::Cruise),
            "cornering" | "corner" => Ok(ScenarioKind::Cornering),
            "braking" => Ok(ScenarioKind::Braking),
            "vibration" => Ok(ScenarioKind::Vibration),
            other => {
                let known: Vec<&str> = ScenarioKind::ALL.iter().map(|k| k.as_str()).collect();
                Err(Error::Config(format!(
                    "unknown scenario type '{}' (expected one of: {})",
                    other,
                    known.join(", ")
                )))
            }
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maneuver parameters applied when a spec is built from a bare kind
#[derive(Debug, Clone, PartialEq)]
pub struct ManeuverParams {
    pub target_speed: f64,
    pub accel_rate: f64,
    pub cruise_speed: f64,
    pub corner_speed: f64,
    pub corner_radius: f64,
    pub corner_direction: Direction,
    pub initial_speed: f64,
    pub decel_rate: f64,
    pub vibration_frequency: f64,
    pub vibration_amplitude: f64,
}

impl Default for ManeuverParams {
    fn default() -> Self {
        Self {
            target_speed: default_speed(),
            accel_rate: default_accel_rate(),
            cruise_speed: default_speed(),
            corner_speed: default_speed(),
            corner_radius: default_radius(),
            corner_direction: Direction::Left,
            initial_speed: default_speed(),
            decel_rate: default_decel_rate(),
            vibration_frequency: default_vibration_frequency(),
            vibration_amplitude: default_vibration_amplitude(),
        }
    }
}

/// One scenario as described in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioSpec {
    /// At rest
    Stationary {
        #[serde(default = "default_duration")]
        duration: f64,
    },
    /// Accelerate from rest to `target_speed` (m/s) at `accel_rate` (m/s²)
    Acceleration {
        #[serde(default = "default_duration")]
        duration: f64,
        #[serde(default = "default_speed")]
        target_speed: f64,
        #[serde(default = "default_accel_rate")]
        accel_rate: f64,
    },
    /// Constant-velocity cruise at `speed` (m/s)
    Cruise {
        #[serde(default = "default_duration")]
        duration: f64,
        #[serde(default = "default_speed")]
        speed: f64,
    },
    /// Steady turn
    #[serde(alias = "corner")]
    Cornering {
        #[serde(default = "default_duration")]
        duration: f64,
        #[serde(default = "default_speed")]
        speed: f64,
        #[serde(default = "default_radius")]
        radius: f64,
        #[serde(default)]
        direction: Direction,
    },
    /// Decelerate from `initial_speed` (m/s) at `decel_rate` (m/s²)
    Braking {
        #[serde(default = "default_duration")]
        duration: f64,
        #[serde(default = "default_speed")]
        initial_speed: f64,
        #[serde(default = "default_decel_rate")]
        decel_rate: f64,
    },
    /// Vibration overlay; the base spec only contributes physics, its
    /// duration must be positive but does not affect timing
    Vibration {
        #[serde(default = "default_duration")]
        duration: f64,
        #[serde(default = "default_vibration_frequency")]
        frequency: f64,
        #[serde(default = "default_vibration_amplitude")]
        amplitude: f64,
        #[serde(default = "default_vibration_base")]
        base: Box<ScenarioSpec>,
    },
}

impl ScenarioSpec {
    pub fn stationary(duration: f64) -> Self {
        ScenarioSpec::Stationary { duration }
    }

    pub fn acceleration(duration: f64, target_speed: f64, accel_rate: f64) -> Self {
        ScenarioSpec::Acceleration {
            duration,
            target_speed,
            accel_rate,
        }
    }

    pub fn cruise(duration: f64, speed: f64) -> Self {
        ScenarioSpec::Cruise { duration, speed }
    }

    pub fn cornering(duration: f64, speed: f64, radius: f64, direction: Direction) -> Self {
        ScenarioSpec::Cornering {
            duration,
            speed,
            radius,
            direction,
        }
    }

    pub fn braking(duration: f64, initial_speed: f64, decel_rate: f64) -> Self {
        ScenarioSpec::Braking {
            duration,
            initial_speed,
            decel_rate,
        }
    }

    pub fn vibration(duration: f64, frequency: f64, amplitude: f64, base: ScenarioSpec) -> Self {
        ScenarioSpec::Vibration {
            duration,
            frequency,
            amplitude,
            base: Box::new(base),
        }
    }

    /// Spec for `kind` using the maneuver parameters in `params`
    pub fn from_kind(kind: ScenarioKind, duration: f64, params: &ManeuverParams) -> Self {
        match kind {
            ScenarioKind::Stationary => Self::stationary(duration),
            ScenarioKind::Acceleration => {
                Self::acceleration(duration, params.target_speed, params.accel_rate)
            }
            ScenarioKind::Cruise => Self::cruise(duration, params.cruise_speed),
            ScenarioKind::Cornering => Self::cornering(
                duration,
                params.corner_speed,
                params.corner_radius,
                params.corner_direction,
            ),
            ScenarioKind::Braking => {
                Self::braking(duration, params.initial_speed, params.decel_rate)
            }
            ScenarioKind::Vibration => Self::vibration(
                duration,
                params.vibration_frequency,
                params.vibration_amplitude,
                Self::cruise(duration, params.cruise_speed),
            ),
        }
    }

    pub fn kind(&self) -> ScenarioKind {
        match self {
            ScenarioSpec::Stationary { .. } => ScenarioKind::Stationary,
            ScenarioSpec::Acceleration { .. } => ScenarioKind::Acceleration,
            ScenarioSpec::Cruise { .. } => ScenarioKind::Cruise,
            ScenarioSpec::Cornering { .. } => ScenarioKind::Cornering,
            ScenarioSpec::Braking { .. } => ScenarioKind::Braking,
            ScenarioSpec::Vibration { .. } => ScenarioKind::Vibration,
        }
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        match self {
            ScenarioSpec::Stationary { duration }
            | ScenarioSpec::Acceleration { duration, .. }
            | ScenarioSpec::Cruise { duration, .. }
            | ScenarioSpec::Cornering { duration, .. }
            | ScenarioSpec::Braking { duration, .. }
            | ScenarioSpec::Vibration { duration, .. } => *duration,
        }
    }

    pub fn set_duration(&mut self, value: f64) {
        match self {
            ScenarioSpec::Stationary { duration }
            | ScenarioSpec::Acceleration { duration, .. }
            | ScenarioSpec::Cruise { duration, .. }
            | ScenarioSpec::Cornering { duration, .. }
            | ScenarioSpec::Braking { duration, .. }
            | ScenarioSpec::Vibration { duration, .. } => *duration = value,
        }
    }

    /// Build the per-sample physics described by this spec
    pub fn motion(&self) -> Result<Motion> {
        let motion: Motion = match self {
            ScenarioSpec::Stationary { .. } => Stationary.into(),
            ScenarioSpec::Acceleration {
                target_speed,
                accel_rate,
                ..
            } => Acceleration::new(*target_speed, *accel_rate)?.into(),
            ScenarioSpec::Cruise { speed, .. } => Cruise::new(*speed)?.into(),
            ScenarioSpec::Cornering {
                speed,
                radius,
                direction,
                ..
            } => Corner::new(*speed, *radius, *direction)?.into(),
            ScenarioSpec::Braking {
                initial_speed,
                decel_rate,
                ..
            } => Braking::new(*initial_speed, *decel_rate)?.into(),
            ScenarioSpec::Vibration {
                frequency,
                amplitude,
                base,
                ..
            } => {
                ensure_positive("vibration base duration", base.duration())?;
                Vibration::new(base.motion()?, *frequency, *amplitude)?.into()
            }
        };
        Ok(motion)
    }

    /// Validate and build a scenario sampled at `sample_rate`
    pub fn build(&self, sample_rate: f64) -> Result<Scenario> {
        Scenario::new(self.duration(), sample_rate, self.motion()?)
    }
}

// Default value functions for serde
fn default_duration() -> f64 {
    DEFAULT_SCENARIO_DURATION
}
fn default_speed() -> f64 {
    10.0
}
fn default_accel_rate() -> f64 {
    2.0
}
fn default_radius() -> f64 {
    20.0
}
fn default_decel_rate() -> f64 {
    2.5
}
fn default_vibration_frequency() -> f64 {
    15.0
}
fn default_vibration_amplitude() -> f64 {
    2.0
}
fn default_vibration_base() -> Box<ScenarioSpec> {
    Box::new(ScenarioSpec::Cruise {
        duration: default_duration(),
        speed: default_speed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        scenarios: Vec<ScenarioSpec>,
    }

    fn parse(toml_str: &str) -> std::result::Result<Vec<ScenarioSpec>, toml::de::Error> {
        toml::from_str::<Wrapper>(toml_str).map(|w| w.scenarios)
    }

    #[test]
    fn test_parse_with_defaults() {
        let specs = parse(
            r#"
[[scenarios]]
type = "stationary"

[[scenarios]]
type = "acceleration"
duration = 8.0
target_speed = 12.0
accel_rate = 1.5

[[scenarios]]
type = "corner"
direction = "right"
"#,
        )
        .unwrap();

        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0], ScenarioSpec::stationary(5.0));
        assert_eq!(specs[1], ScenarioSpec::acceleration(8.0, 12.0, 1.5));
        assert_eq!(
            specs[2],
            ScenarioSpec::cornering(5.0, 10.0, 20.0, Direction::Right)
        );
    }

    #[test]
    fn test_parse_vibration_with_base() {
        let specs = parse(
            r#"
[[scenarios]]
type = "vibration"
duration = 3.0
amplitude = 1.0
base = { type = "braking", initial_speed = 8.0 }
"#,
        )
        .unwrap();

        let ScenarioSpec::Vibration {
            frequency,
            amplitude,
            base,
            ..
        } = &specs[0]
        else {
            panic!("expected vibration spec, got {:?}", specs[0]);
        };
        assert_eq!(*frequency, 15.0);
        assert_eq!(*amplitude, 1.0);
        assert_eq!(**base, ScenarioSpec::braking(5.0, 8.0, 2.5));
        assert_eq!(specs[0].build(100.0).unwrap().sample_count(), 300);
    }

    #[test]
    fn test_unknown_type_fails_to_parse() {
        let result = parse(
            r#"
[[scenarios]]
type = "wheelie"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "cornering".parse::<ScenarioKind>().unwrap(),
            ScenarioKind::Cornering
        );
        assert_eq!(
            "corner".parse::<ScenarioKind>().unwrap(),
            ScenarioKind::Cornering
        );
        assert_eq!(
            "Braking".parse::<ScenarioKind>().unwrap(),
            ScenarioKind::Braking
        );

        let err = "wheelie".parse::<ScenarioKind>().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("wheelie"));
    }

    #[test]
    fn test_from_kind_uses_params() {
        let params = ManeuverParams {
            corner_radius: 15.0,
            corner_direction: Direction::Right,
            ..Default::default()
        };
        let spec = ScenarioSpec::from_kind(ScenarioKind::Cornering, 4.0, &params);
        assert_eq!(
            spec,
            ScenarioSpec::cornering(4.0, 10.0, 15.0, Direction::Right)
        );
        assert_eq!(spec.kind(), ScenarioKind::Cornering);
        assert_eq!(spec.duration(), 4.0);
    }

    #[test]
    fn test_build_propagates_errors() {
        let zero_radius = ScenarioSpec::cornering(5.0, 10.0, 0.0, Direction::Left);
        assert!(matches!(zero_radius.build(100.0), Err(Error::Domain(_))));

        let zero_duration = ScenarioSpec::stationary(0.0);
        assert!(matches!(zero_duration.build(100.0), Err(Error::Config(_))));

        let zero_rate = ScenarioSpec::stationary(5.0);
        assert!(matches!(zero_rate.build(0.0), Err(Error::Config(_))));

        let bad_base = ScenarioSpec::vibration(
            5.0,
            15.0,
            2.0,
            ScenarioSpec::cornering(5.0, 10.0, 0.0, Direction::Left),
        );
        assert!(matches!(bad_base.build(100.0), Err(Error::Domain(_))));
    }

    #[test]
    fn test_vibration_base_duration_checked() {
        let specs = parse(
            r#"
[[scenarios]]
type = "vibration"
base = { type = "cruise", duration = -3.0 }
"#,
        )
        .unwrap();
        assert!(matches!(specs[0].build(100.0), Err(Error::Config(_))));

        // Base duration does not change the overlay's timing
        let spec = ScenarioSpec::vibration(2.0, 15.0, 2.0, ScenarioSpec::cruise(9.0, 10.0));
        assert_eq!(spec.build(100.0).unwrap().sample_count(), 200);
    }

    #[test]
    fn test_set_duration() {
        let mut spec = ScenarioSpec::braking(4.0, 10.0, 2.5);
        spec.set_duration(6.0);
        assert_eq!(spec, ScenarioSpec::braking(6.0, 10.0, 2.5));
    }
}
