//! Ride composition
//!
//! A [`Ride`] is an ordered list of scenarios generated onto one continuous
//! timeline. A time cursor starts at 0 and advances by each scenario's
//! duration; every scenario is sampled from the cursor position.
//!
//! No smoothing is applied between scenarios: channels may jump at a boundary
//! (e.g. from braking straight into standing still).
//!
//! ```rust,ignore
//! use gati_sim::ride::{Ride, presets};
//!
//! let ride = Ride::from_specs(&presets::test_ride(), 100.0)?;
//! for sample in ride.samples() {
//!     // stream to a sink without materializing the ride
//! }
//! ```

pub mod presets;
mod spec;

pub use presets::{Preset, scale_durations, test_ride};
pub use spec::{DEFAULT_SCENARIO_DURATION, ManeuverParams, ScenarioKind, ScenarioSpec};

use crate::error::{Result, ensure_positive};
use crate::scenario::{Scenario, ScenarioSamples};
use crate::types::ImuSample;

/// Ordered sequence of scenarios on one timeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ride {
    scenarios: Vec<Scenario>,
}

impl Ride {
    /// Create a ride from pre-built scenarios
    ///
    /// Scenarios are expected to share one sample rate. Mixed rates are
    /// accepted but logged, since per-sample spacing then changes mid-stream.
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        let ride = Self { scenarios };
        ride.check_uniform_rate();
        ride
    }

    /// Build every spec at `sample_rate`
    ///
    /// Fails on the first invalid spec; nothing is generated in that case.
    pub fn from_specs(specs: &[ScenarioSpec], sample_rate: f64) -> Result<Self> {
        ensure_positive("sample_rate", sample_rate)?;
        let scenarios = specs
            .iter()
            .map(|spec| spec.build(sample_rate))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { scenarios })
    }

    /// Append a scenario at the end of the ride
    pub fn push(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
        self.check_uniform_rate();
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Sum of scenario durations (seconds)
    pub fn total_duration(&self) -> f64 {
        self.scenarios.iter().map(Scenario::duration).sum()
    }

    /// Sum of per-scenario sample counts
    pub fn sample_count(&self) -> usize {
        self.scenarios.iter().map(Scenario::sample_count).sum()
    }

    /// Eagerly generate the whole ride
    pub fn generate(&self) -> Vec<ImuSample> {
        let mut samples = Vec::with_capacity(self.sample_count());
        let mut cursor = 0.0;

        for scenario in &self.scenarios {
            log::info!(
                "Generating: {} ({:.1}s, {} samples)",
                scenario.name(),
                scenario.duration(),
                scenario.sample_count()
            );
            samples.extend(scenario.samples(cursor));
            cursor += scenario.duration();
        }

        samples
    }

    /// Lazily generate the ride
    ///
    /// Yields exactly the samples of [`Ride::generate`]. Call again to restart.
    pub fn samples(&self) -> RideSamples<'_> {
        RideSamples {
            scenarios: self.scenarios.iter(),
            current: None,
            cursor: 0.0,
            remaining: self.sample_count(),
        }
    }

    fn check_uniform_rate(&self) {
        let Some(first) = self.scenarios.first() else {
            return;
        };
        if let Some(other) = self
            .scenarios
            .iter()
            .find(|s| s.sample_rate() != first.sample_rate())
        {
            log::warn!(
                "Ride mixes sample rates ({} Hz and {} Hz); sample spacing will change between scenarios",
                first.sample_rate(),
                other.sample_rate()
            );
        }
    }
}

/// Lazy sample stream of a ride, returned by [`Ride::samples`]
#[derive(Debug, Clone)]
pub struct RideSamples<'a> {
    scenarios: std::slice::Iter<'a, Scenario>,
    current: Option<ScenarioSamples<'a>>,
    cursor: f64,
    remaining: usize,
}

impl Iterator for RideSamples<'_> {
    type Item = ImuSample;

    fn next(&mut self) -> Option<ImuSample> {
        loop {
            if let Some(sample) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(sample);
            }
            let scenario = self.scenarios.next()?;
            log::debug!(
                "Streaming: {} from t={:.3}s",
                scenario.name(),
                self.cursor
            );
            self.current = Some(scenario.samples(self.cursor));
            self.cursor += scenario.duration();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RideSamples<'_> {}
