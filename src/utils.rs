//! Utility functions shared across the codebase.
//!
//! This module provides the range mapping used to turn curve factors into
//! physical output values, unit conversions for color temperature, and small
//! display helpers.

use std::path::Path;

use crate::constants::MAXIMUM_BRIGHTNESS;

/// Map a factor onto the range between two endpoints.
///
/// A factor of 0.0 yields exactly `at_zero` and 1.0 yields exactly `at_one`.
/// The weighted form is used instead of `start + (end - start) * factor` so
/// both endpoints are reproduced without rounding error.
///
/// # Arguments
/// * `at_zero` - Value returned when factor = 0.0
/// * `at_one` - Value returned when factor = 1.0
/// * `factor` - Interpolation factor, expected in [0.0, 1.0]
///
/// # Examples
/// ```
/// use daylightr::utils::interpolate_f64;
/// assert_eq!(interpolate_f64(75.0, 255.0, 0.0), 75.0);
/// assert_eq!(interpolate_f64(75.0, 255.0, 1.0), 255.0);
/// assert_eq!(interpolate_f64(500.0, 153.0, 1.0), 153.0);
/// ```
pub fn interpolate_f64(at_zero: f64, at_one: f64, factor: f64) -> f64 {
    (1.0 - factor) * at_zero + factor * at_one
}

/// Convert mireds to kelvin.
///
/// # Examples
/// ```
/// use daylightr::utils::mired_to_kelvin;
/// assert_eq!(mired_to_kelvin(500.0), 2000.0);
/// ```
pub fn mired_to_kelvin(mired: f64) -> f64 {
    1_000_000.0 / mired
}

/// Express a Home Assistant brightness (0-255) as a percentage.
pub fn brightness_to_percent(brightness: f64) -> f64 {
    brightness / MAXIMUM_BRIGHTNESS * 100.0
}

/// Format a path for log output, abbreviating the home directory as `~`.
pub fn path_for_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
