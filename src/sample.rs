//! Sampling a curve over a whole day for inspection.
//!
//! This is a debugging aid, not part of the curve contract: it evaluates the
//! curve on an evenly spaced grid and renders the result as a table or CSV
//! that can be fed to any plotting tool.

use std::fmt::Write as _;

use crate::constants::HOURS_IN_DAY;
use crate::daylight::{DaylightCurve, Lighting};
use crate::error::CurveError;
use crate::time_of_day::format_hours;

/// One point of a sampled day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub hours: f64,
    pub lighting: Lighting,
}

/// Output format for rendered samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleFormat {
    #[default]
    Table,
    Csv,
}

/// Evaluate `curve` at `points` evenly spaced hours from 0 to 24 inclusive.
///
/// The last point is 24h, which the curve folds back onto midnight.
/// Fewer than two points yields a single sample at midnight.
pub fn sample_day(
    curve: &DaylightCurve,
    sunrise: f64,
    sunset: f64,
    points: usize,
) -> Result<Vec<Sample>, CurveError> {
    let intervals = points.saturating_sub(1).max(1) as f64;

    (0..points.max(1))
        .map(|i| {
            // Multiply before dividing so the last point lands on 24.0 exactly
            let hours = HOURS_IN_DAY * i as f64 / intervals;
            curve
                .compute(sunrise, sunset, hours)
                .map(|lighting| Sample { hours, lighting })
        })
        .collect()
}

/// Render samples in the requested format.
pub fn render(samples: &[Sample], format: SampleFormat) -> String {
    match format {
        SampleFormat::Table => render_table(samples),
        SampleFormat::Csv => render_csv(samples),
    }
}

/// Render samples as an aligned table with a brightness bar.
pub fn render_table(samples: &[Sample]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5}  {:>10}  {:>7}  {:>7}  {}",
        "time", "brightness", "mired", "kelvin", "level"
    );
    for sample in samples {
        let lighting = &sample.lighting;
        let bar_len = (lighting.brightness_percent() / 5.0).round().max(0.0) as usize;
        let _ = writeln!(
            out,
            "{:>5}  {:>10.1}  {:>7.1}  {:>7.0}  {}",
            format_hours(sample.hours),
            lighting.brightness,
            lighting.mired,
            lighting.kelvin(),
            "█".repeat(bar_len)
        );
    }
    out
}

/// Render samples as CSV with a header row.
pub fn render_csv(samples: &[Sample]) -> String {
    let mut out = String::from("hours,brightness,mired\n");
    for sample in samples {
        let _ = writeln!(
            out,
            "{:.4},{:.4},{:.4}",
            sample.hours, sample.lighting.brightness, sample.lighting.mired
        );
    }
    out
}
