//! gati-sim - Synthetic IMU ride generator
//!
//! Writes a CSV ride (timestamp_ms, accel, gyro, mag) for pipeline testing.
//!
//! # Usage
//!
//! ```bash
//! # Default 55 s test ride at 100 Hz with noise
//! gati-sim -o ride_001.csv
//!
//! # Preset rescaled to two minutes, reproducible noise
//! gati-sim --preset medium --duration 120 --seed 42
//!
//! # Hand-picked maneuvers, 4 s each, no noise
//! gati-sim -s stationary acceleration cornering braking -d 16 --no-noise
//!
//! # Ride described in a TOML file
//! gati-sim --config configs/example_ride.toml
//! ```
//!
//! Scenario selection, highest priority first: `--preset`, `--scenarios`,
//! scenarios from `--config`, the built-in test ride.

use std::path::PathBuf;

use clap::Parser;

use gati_sim::io::{CsvWriter, write_samples};
use gati_sim::{
    CliOverrides, Direction, GeneratorConfig, ManeuverParams, NoiseGenerator, Preset, Result,
    ScenarioKind,
};

#[derive(Parser)]
#[command(name = "gati-sim")]
#[command(about = "Generate synthetic cycling IMU data for pipeline testing")]
struct Args {
    /// TOML ride configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output CSV file
    #[arg(short, long, default_value = "synthetic_ride.csv")]
    output: PathBuf,

    /// Sample rate in Hz (default: 100, or the config file value)
    #[arg(short = 'r', long)]
    sample_rate: Option<f64>,

    /// Total duration in seconds (overrides individual scenario durations)
    #[arg(short, long)]
    duration: Option<f64>,

    /// Accelerometer noise level in m/s² (gyro uses a fifth of it)
    #[arg(short, long)]
    noise: Option<f64>,

    /// Disable noise (perfect data)
    #[arg(long)]
    no_noise: bool,

    /// Noise seed (random and logged if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Scenarios to include, in order
    #[arg(short, long, num_args = 1..)]
    scenarios: Vec<ScenarioKind>,

    /// Built-in ride
    #[arg(long)]
    preset: Option<Preset>,

    /// Target speed for acceleration (m/s)
    #[arg(long, default_value = "10.0")]
    target_speed: f64,

    /// Acceleration rate (m/s²)
    #[arg(long, default_value = "2.0")]
    accel_rate: f64,

    /// Cruise speed (m/s)
    #[arg(long, default_value = "10.0")]
    cruise_speed: f64,

    /// Speed during cornering (m/s)
    #[arg(long, default_value = "10.0")]
    corner_speed: f64,

    /// Corner radius (m)
    #[arg(long, default_value = "20.0")]
    corner_radius: f64,

    /// Corner direction (left or right)
    #[arg(long, default_value = "left")]
    corner_direction: Direction,

    /// Initial speed for braking (m/s)
    #[arg(long, default_value = "10.0")]
    initial_speed: f64,

    /// Deceleration rate (m/s²)
    #[arg(long, default_value = "2.5")]
    decel_rate: f64,

    /// Vibration frequency (Hz)
    #[arg(long, default_value = "15.0")]
    vibration_frequency: f64,

    /// Vibration amplitude (m/s²)
    #[arg(long, default_value = "2.0")]
    vibration_amplitude: f64,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            sample_rate: self.sample_rate,
            duration: self.duration,
            noise: self.noise,
            no_noise: self.no_noise,
            seed: self.seed,
            scenarios: self.scenarios.clone(),
            preset: self.preset,
            params: ManeuverParams {
                target_speed: self.target_speed,
                accel_rate: self.accel_rate,
                cruise_speed: self.cruise_speed,
                corner_speed: self.corner_speed,
                corner_radius: self.corner_radius,
                corner_direction: self.corner_direction,
                initial_speed: self.initial_speed,
                decel_rate: self.decel_rate,
                vibration_frequency: self.vibration_frequency,
                vibration_amplitude: self.vibration_amplitude,
            },
        }
    }
}

/// Load the (optional) config file and merge command line overrides into it
fn build_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            log::info!("Using config: {}", path.display());
            GeneratorConfig::from_file(path)?
        }
        None => GeneratorConfig::default(),
    };
    config.apply_overrides(&args.overrides())?;
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;
    let ride = config.build_ride()?;
    let model = config.noise.model()?;

    log::info!(
        "Generating synthetic IMU data at {} Hz ({} scenarios, {:.1}s)...",
        config.sample_rate,
        ride.len(),
        ride.total_duration()
    );
    for scenario in ride.scenarios() {
        log::info!("  {} ({:.1}s)", scenario.name(), scenario.duration());
    }

    let seed = config.noise.seed.unwrap_or_else(rand::random);
    if model.is_silent() {
        log::info!("Noise disabled");
    } else {
        log::info!(
            "Adding sensor noise (σ={} m/s², gyro σ={} rad/s, seed {})",
            model.accel_stddev(),
            model.gyro_stddev(),
            seed
        );
    }
    let mut noise = NoiseGenerator::new(seed);

    log::info!(
        "Writing {} samples to {}...",
        ride.sample_count(),
        args.output.display()
    );
    let mut writer = CsvWriter::create(&args.output)?;
    let mut last_timestamp = 0.0;
    let stream = model
        .apply_iter(ride.samples(), &mut noise)
        .inspect(|s| last_timestamp = s.timestamp);
    let count = write_samples(&mut writer, stream)?;

    let file_size = std::fs::metadata(&args.output)?.len();
    println!();
    println!("Generated {} samples ({:.1} seconds)", count, last_timestamp);
    println!("File: {}", args.output.display());
    println!("Sample rate: {} Hz", config.sample_rate);
    println!("File size: {:.1} KB", file_size as f64 / 1024.0);

    Ok(())
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
