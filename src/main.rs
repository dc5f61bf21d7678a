//! daylightr binary.
//!
//! Loads the optional configuration, resolves the day bounds (command line
//! values win over configured ones) and prints the lighting target for one
//! moment or a sampled day. Diagnostics move to stderr when stdout carries CSV.

use anyhow::{Context, Result};
use chrono::{Local, NaiveTime};
use std::path::Path;

use daylightr::args::{CliAction, ParsedArgs};
use daylightr::constants::EXIT_FAILURE;
use daylightr::sample::{SampleFormat, render, sample_day};
use daylightr::time_of_day::hours_of_day;
use daylightr::{Config, DaylightCurve, Log};

fn main() {
    let parsed = match ParsedArgs::parse(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(e) => e.exit(),
    };

    if parsed.debug_enabled {
        Log::set_debug(true);
    }

    if let Err(e) = run(parsed) {
        Log::log_pipe();
        Log::log_error(&format!("{:#}", e));
        Log::log_end();
        std::process::exit(EXIT_FAILURE);
    }
}

fn run(parsed: ParsedArgs) -> Result<()> {
    match parsed.action {
        CliAction::Now {
            sunrise,
            sunset,
            at,
        } => {
            let config = load_config(parsed.config_path.as_deref())?;
            let (sunrise, sunset) = resolve_bounds(&config, sunrise, sunset)?;
            let at = at.unwrap_or_else(|| Local::now().time());
            run_now(&config.curve()?, &sunrise, &sunset, &at)
        }
        CliAction::Sample {
            sunrise,
            sunset,
            points,
            format,
        } => {
            if matches!(format, SampleFormat::Csv) {
                Log::set_stderr_only(true);
            }
            let config = load_config(parsed.config_path.as_deref())?;
            let (sunrise, sunset) = resolve_bounds(&config, sunrise, sunset)?;
            run_sample(&config.curve()?, &sunrise, &sunset, points, format)
        }
        CliAction::InitConfig { path } => {
            let path = match path.or(parsed.config_path) {
                Some(path) => path,
                None => Config::get_config_path()?,
            };
            Log::log_version();
            Config::create_default_config(&path)?;
            Log::log_end();
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = Config::load_optional(path)?;
    if Log::is_debug() {
        config.log_config();
    }
    Ok(config)
}

/// Command line values win over configured ones.
fn resolve_bounds(
    config: &Config,
    sunrise: Option<NaiveTime>,
    sunset: Option<NaiveTime>,
) -> Result<(NaiveTime, NaiveTime)> {
    let sunrise = match sunrise {
        Some(time) => time,
        None => config.sunrise_time()?,
    };
    let sunset = match sunset {
        Some(time) => time,
        None => config.sunset_time()?,
    };
    Ok((sunrise, sunset))
}

/// Reported once per run; the curve itself stays silent.
fn warn_on_fallback(curve: &DaylightCurve, sunrise: &NaiveTime, sunset: &NaiveTime) {
    if curve.falls_back(hours_of_day(sunrise), hours_of_day(sunset)) {
        Log::log_warning(&format!(
            "Sunset ({}) is not after sunrise ({}), using fallback output",
            sunset.format("%H:%M:%S"),
            sunrise.format("%H:%M:%S")
        ));
    }
}

fn run_now(
    curve: &DaylightCurve,
    sunrise: &NaiveTime,
    sunset: &NaiveTime,
    at: &NaiveTime,
) -> Result<()> {
    Log::log_version();
    warn_on_fallback(curve, sunrise, sunset);
    let lighting = curve
        .compute_from_time(sunrise, sunset, at)
        .context("Failed to compute lighting target")?;

    Log::log_decorated(&format!(
        "Day bounds: sunrise {} / sunset {}",
        sunrise.format("%H:%M:%S"),
        sunset.format("%H:%M:%S")
    ));
    Log::log_debug(&format!(
        "Factors: brightness {:.4}, color {:.4}",
        curve.brightness_factor(hours_of_day(at)),
        curve.color_temp_factor(hours_of_day(sunrise), hours_of_day(sunset), hours_of_day(at))
    ));
    Log::log_block_start(&format!("Target at {}", at.format("%H:%M:%S")));
    Log::log_indented(&format!(
        "Brightness: {:.1} ({:.0}%)",
        lighting.brightness,
        lighting.brightness_percent()
    ));
    Log::log_indented(&format!(
        "Color temperature: {:.1} mired ({:.0}K)",
        lighting.mired,
        lighting.kelvin()
    ));
    Log::log_end();
    Ok(())
}

fn run_sample(
    curve: &DaylightCurve,
    sunrise: &NaiveTime,
    sunset: &NaiveTime,
    points: usize,
    format: SampleFormat,
) -> Result<()> {
    if matches!(format, SampleFormat::Table) {
        Log::log_version();
    }
    warn_on_fallback(curve, sunrise, sunset);
    let samples = sample_day(curve, hours_of_day(sunrise), hours_of_day(sunset), points)
        .context("Failed to sample the day")?;

    match format {
        // Diagnostics are on stderr here, so stdout is nothing but CSV
        SampleFormat::Csv => print!("{}", render(&samples, format)),
        SampleFormat::Table => {
            Log::log_decorated(&format!(
                "sunrise hours: {}, sunset hours: {}",
                hours_of_day(sunrise),
                hours_of_day(sunset)
            ));
            Log::log_pipe();
            print!("{}", render(&samples, format));
            Log::log_end();
        }
    }
    Ok(())
}
