//! # GatiSim
//!
//! Synthetic IMU ride generator for exercising data pipelines without a
//! sensor on a bike.
//!
//! ## Overview
//!
//! A ride is a sequence of known maneuvers, each producing 9-axis samples
//! (accelerometer, gyroscope, magnetometer) as a pure function of time:
//!
//! - **Stationary** - gravity and the reference magnetic field only
//! - **Acceleration** / **Braking** - constant forward (de)celeration
//! - **Cruise** - constant speed with road coupling on the accelerometer
//! - **Cornering** - centripetal acceleration, yaw rate, lean, rotating heading
//! - **Vibration** - sinusoidal vertical buzz over any other maneuver
//!
//! Seeded Gaussian noise can be layered on the result, and the stream is
//! written as CSV in the ingestion schema.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gati_sim::{NoiseGenerator, NoiseModel, Ride};
//! use gati_sim::io::{CsvWriter, write_samples};
//! use gati_sim::ride::presets::Preset;
//!
//! let ride = Ride::from_specs(&Preset::Medium.scenarios(), 100.0)?;
//! let model = NoiseModel::new(0.05)?;
//! let mut noise = NoiseGenerator::new(42);
//!
//! let mut writer = CsvWriter::create("ride.csv")?;
//! write_samples(&mut writer, model.apply_iter(ride.samples(), &mut noise))?;
//! ```
//!
//! ## Coordinate System
//!
//! Body frame, X forward, Y lateral (left turns positive), Z vertical with
//! gravity reading `-9.81` when level. Yaw is CCW positive.

pub mod config;
pub mod error;
pub mod io;
pub mod noise;
pub mod ride;
pub mod scenario;
pub mod types;

// Re-export commonly used types
pub use config::{CliOverrides, GeneratorConfig, NoiseSection};
pub use error::{Error, Result};
pub use noise::{NoiseGenerator, NoiseModel, add_noise};
pub use ride::{ManeuverParams, Preset, Ride, ScenarioKind, ScenarioSpec};
pub use scenario::{Direction, Kinematics, Motion, Scenario};
pub use types::ImuSample;
