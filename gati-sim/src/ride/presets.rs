//! Built-in rides
//!
//! | Preset | Length | Character |
//! |--------|--------|-----------|
//! | `short` | 14 s | One corner, quick stop |
//! | `medium` | 60 s | Left and right corners with straights |
//! | `long` | 164 s | Three corners, long cruises |
//! | `aggressive` | 30 s | Hard acceleration, tight chicane |
//! | `endurance` | 200 s | Gentle, long steady cruising |
//!
//! Straight segments between maneuvers are cruises at the speed reached by the
//! preceding acceleration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ScenarioSpec;
use crate::error::{Error, Result, ensure_positive};
use crate::scenario::Direction::{Left, Right};

/// Named scenario list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Short,
    Medium,
    Long,
    Aggressive,
    Endurance,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Short,
        Preset::Medium,
        Preset::Long,
        Preset::Aggressive,
        Preset::Endurance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Short => "short",
            Preset::Medium => "medium",
            Preset::Long => "long",
            Preset::Aggressive => "aggressive",
            Preset::Endurance => "endurance",
        }
    }

    /// Scenario list of this preset
    pub fn scenarios(self) -> Vec<ScenarioSpec> {
        use ScenarioSpec as S;

        match self {
            Preset::Short => vec![
                S::stationary(2.0),
                S::acceleration(3.0, 8.0, 2.5),
                S::cornering(4.0, 8.0, 15.0, Left),
                S::braking(3.0, 8.0, 2.5),
                S::stationary(2.0),
            ],
            Preset::Medium => vec![
                S::stationary(5.0),
                S::acceleration(8.0, 12.0, 1.5),
                S::cruise(10.0, 12.0),
                S::cornering(8.0, 12.0, 20.0, Left),
                S::cruise(5.0, 12.0),
                S::cornering(8.0, 12.0, 25.0, Right),
                S::cruise(5.0, 12.0),
                S::braking(6.0, 12.0, 2.0),
                S::stationary(5.0),
            ],
            Preset::Long => vec![
                S::stationary(10.0),
                S::acceleration(15.0, 15.0, 1.0),
                S::cruise(30.0, 15.0),
                S::cornering(12.0, 15.0, 30.0, Left),
                S::cruise(20.0, 15.0),
                S::cornering(12.0, 15.0, 25.0, Right),
                S::cruise(20.0, 15.0),
                S::cornering(10.0, 15.0, 20.0, Left),
                S::cruise(15.0, 15.0),
                S::braking(10.0, 15.0, 1.5),
                S::stationary(10.0),
            ],
            Preset::Aggressive => vec![
                S::stationary(2.0),
                S::acceleration(4.0, 15.0, 3.5),
                S::cornering(6.0, 15.0, 12.0, Left),
                S::cornering(6.0, 15.0, 12.0, Right),
                S::cornering(6.0, 15.0, 10.0, Left),
                S::braking(4.0, 15.0, 3.5),
                S::stationary(2.0),
            ],
            Preset::Endurance => vec![
                S::stationary(5.0),
                S::acceleration(20.0, 8.0, 0.4),
                S::cruise(60.0, 8.0),
                S::cornering(15.0, 8.0, 40.0, Left),
                S::cruise(30.0, 8.0),
                S::cornering(15.0, 8.0, 35.0, Right),
                S::cruise(30.0, 8.0),
                S::braking(20.0, 8.0, 0.4),
                S::stationary(5.0),
            ],
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Config(format!("unknown preset '{}'", s)))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default ride when nothing else is requested
///
/// Start stationary, accelerate to 10 m/s, cruise, left corner, straight,
/// right corner, straight, brake to a stop, stationary: 55 s in total.
pub fn test_ride() -> Vec<ScenarioSpec> {
    use ScenarioSpec as S;

    vec![
        S::stationary(5.0),
        S::acceleration(5.0, 10.0, 2.0),
        S::cruise(10.0, 10.0),
        S::cornering(8.0, 10.0, 20.0, Left),
        S::cruise(5.0, 10.0),
        S::cornering(8.0, 10.0, 25.0, Right),
        S::cruise(5.0, 10.0),
        S::braking(4.0, 10.0, 2.5),
        S::stationary(5.0),
    ]
}

/// Rescale every duration proportionally so they sum to `total`
pub fn scale_durations(specs: &mut [ScenarioSpec], total: f64) -> Result<()> {
    ensure_positive("total duration", total)?;
    let current: f64 = specs.iter().map(ScenarioSpec::duration).sum();
    if current <= 0.0 {
        return Err(Error::Config(
            "cannot rescale an empty scenario list".to_string(),
        ));
    }

    let factor = total / current;
    for spec in specs.iter_mut() {
        spec.set_duration(spec.duration() * factor);
    }
    log::debug!("Scaled {} scenarios by {:.3}", specs.len(), factor);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ride::Ride;
    use approx::assert_relative_eq;

    fn total(specs: &[ScenarioSpec]) -> f64 {
        specs.iter().map(ScenarioSpec::duration).sum()
    }

    #[test]
    fn test_preset_lengths() {
        assert_eq!(total(&Preset::Short.scenarios()), 14.0);
        assert_eq!(total(&Preset::Medium.scenarios()), 60.0);
        assert_eq!(total(&Preset::Long.scenarios()), 164.0);
        assert_eq!(total(&Preset::Aggressive.scenarios()), 30.0);
        assert_eq!(total(&Preset::Endurance.scenarios()), 200.0);
    }

    #[test]
    fn test_test_ride_is_55_seconds() {
        let specs = test_ride();
        assert_eq!(total(&specs), 55.0);
        let ride = Ride::from_specs(&specs, 100.0).unwrap();
        assert_eq!(ride.sample_count(), 5500);
    }

    #[test]
    fn test_all_presets_build() {
        for preset in Preset::ALL {
            let ride = Ride::from_specs(&preset.scenarios(), 100.0);
            assert!(ride.is_ok(), "preset {} failed to build", preset);
        }
    }

    #[test]
    fn test_scale_durations() {
        let mut specs = Preset::Medium.scenarios();
        scale_durations(&mut specs, 120.0).unwrap();

        assert_relative_eq!(total(&specs), 120.0, epsilon = 1e-9);
        // Proportions preserved: first stationary was 5 of 60 s
        assert_relative_eq!(specs[0].duration(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_durations_rejects_bad_total() {
        let mut specs = test_ride();
        assert!(matches!(
            scale_durations(&mut specs, 0.0),
            Err(Error::Config(_))
        ));
        assert!(scale_durations(&mut [], 10.0).is_err());
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("aggressive".parse::<Preset>().unwrap(), Preset::Aggressive);
        assert_eq!("Long".parse::<Preset>().unwrap(), Preset::Long);
        assert!(matches!("sprint".parse::<Preset>(), Err(Error::Config(_))));
    }
}
