//! Generator configuration
//!
//! Loads a ride description from a TOML file. Every field has a default, so an
//! empty file generates the built-in test ride at 100 Hz with default noise.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! GeneratorConfig
//! ├── sample_rate                   # Hz, > 0
//! ├── duration                      # Optional total, rescales scenarios
//! ├── preset                        # Used when no scenarios are listed
//! ├── NoiseSection
//! │   ├── enabled, seed
//! │   └── accel_stddev, gyro_stddev
//! └── scenarios: [ScenarioSpec]     # Tagged by `type`
//! ```
//!
//! Scenario selection: explicit `scenarios` win over `preset`, which wins over
//! the built-in test ride.
//!
//! Command line values are merged on top with [`GeneratorConfig::apply_overrides`].
//! There a `--preset` beats `--scenarios`, which beats scenarios from the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ensure_positive};
use crate::noise::{DEFAULT_ACCEL_STDDEV, NoiseModel};
use crate::ride::{
    DEFAULT_SCENARIO_DURATION, ManeuverParams, Preset, Ride, ScenarioKind, ScenarioSpec,
    scale_durations, test_ride,
};

/// Top-level generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    /// Total ride duration in seconds; rescales every scenario proportionally
    #[serde(default)]
    pub duration: Option<f64>,

    /// Built-in ride used when `scenarios` is empty
    #[serde(default)]
    pub preset: Option<Preset>,

    /// Noise injection settings
    #[serde(default)]
    pub noise: NoiseSection,

    /// Explicit scenario list
    #[serde(default)]
    pub scenarios: Vec<ScenarioSpec>,
}

/// Noise injection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseSection {
    /// Disable to emit the exact deterministic signal
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Accelerometer noise standard deviation (m/s²)
    #[serde(default = "default_accel_stddev")]
    pub accel_stddev: f64,

    /// Gyroscope noise standard deviation (rad/s), `accel_stddev / 5` if unset
    #[serde(default)]
    pub gyro_stddev: Option<f64>,

    /// Random seed; unset means the caller picks one
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_sample_rate() -> f64 {
    100.0
}
fn default_true() -> bool {
    true
}
fn default_accel_stddev() -> f64 {
    DEFAULT_ACCEL_STDDEV
}

impl Default for NoiseSection {
    fn default() -> Self {
        Self {
            enabled: true,
            accel_stddev: default_accel_stddev(),
            gyro_stddev: None,
            seed: None,
        }
    }
}

impl NoiseSection {
    /// Noise model for these settings; a disabled section yields the identity model
    pub fn model(&self) -> Result<NoiseModel> {
        if !self.enabled {
            return Ok(NoiseModel::disabled());
        }
        let model = NoiseModel::new(self.accel_stddev)?;
        match self.gyro_stddev {
            Some(gyro) => model.with_gyro_stddev(gyro),
            None => Ok(model),
        }
    }
}

/// Values given on the command line, applied over a loaded configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub sample_rate: Option<f64>,
    /// Total duration; split evenly across `scenarios`, otherwise a rescale
    pub duration: Option<f64>,
    /// Accelerometer σ; gyro σ is re-derived from it
    pub noise: Option<f64>,
    pub no_noise: bool,
    pub seed: Option<u64>,
    pub scenarios: Vec<ScenarioKind>,
    pub preset: Option<Preset>,
    /// Parameters for scenarios built from `scenarios`
    pub params: ManeuverParams,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            duration: None,
            preset: None,
            noise: NoiseSection::default(),
            scenarios: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        log::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GeneratorConfig =
            toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check everything that can be checked before generation starts
    pub fn validate(&self) -> Result<()> {
        ensure_positive("sample_rate", self.sample_rate)?;
        if let Some(duration) = self.duration {
            ensure_positive("duration", duration)?;
        }
        for (i, spec) in self.scenarios.iter().enumerate() {
            ensure_positive(&format!("scenarios[{}].duration", i), spec.duration())?;
        }
        self.noise.model()?;
        Ok(())
    }

    /// Scenario list after selection and duration rescaling
    pub fn scenario_specs(&self) -> Result<Vec<ScenarioSpec>> {
        let mut specs = if !self.scenarios.is_empty() {
            self.scenarios.clone()
        } else if let Some(preset) = self.preset {
            log::info!("Using preset: {}", preset);
            preset.scenarios()
        } else {
            log::info!("Using default test ride");
            test_ride()
        };

        if let Some(total) = self.duration {
            scale_durations(&mut specs, total)?;
        }
        Ok(specs)
    }

    /// Validate and build the ride
    pub fn build_ride(&self) -> Result<Ride> {
        self.validate()?;
        Ride::from_specs(&self.scenario_specs()?, self.sample_rate)
    }

    /// Merge command line overrides, then validate the result
    pub fn apply_overrides(&mut self, overrides: &CliOverrides) -> Result<()> {
        if let Some(rate) = overrides.sample_rate {
            self.sample_rate = rate;
        }
        if let Some(sigma) = overrides.noise {
            self.noise.accel_stddev = sigma;
            self.noise.gyro_stddev = None;
        }
        if overrides.no_noise {
            self.noise.enabled = false;
        }
        if overrides.seed.is_some() {
            self.noise.seed = overrides.seed;
        }

        if let Some(preset) = overrides.preset {
            self.preset = Some(preset);
            self.scenarios.clear();
            if overrides.duration.is_some() {
                self.duration = overrides.duration;
            }
        } else if !overrides.scenarios.is_empty() {
            let per_scenario = overrides
                .duration
                .map(|total| total / overrides.scenarios.len() as f64)
                .unwrap_or(DEFAULT_SCENARIO_DURATION);
            self.scenarios = overrides
                .scenarios
                .iter()
                .map(|kind| ScenarioSpec::from_kind(*kind, per_scenario, &overrides.params))
                .collect();
            self.duration = None;
        } else if overrides.duration.is_some() {
            self.duration = overrides.duration;
        }

        self.validate()
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, contents)?;
        Ok(())
    }
}
