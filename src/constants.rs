//! Reference constants and default values for daylightr.
//!
//! The shape parameters in this module fully determine the curves. Any
//! configuration override falls back to these values, so output stays
//! compatible with the reference behavior unless a user explicitly opts out.

use crate::daylight::{CurveVariant, ErrorPolicy};

// ═══ Output Ranges ═══
// Home Assistant accepts mireds in [153, 500] and brightness in [0, 255]

pub const MIRED_MIN: f64 = 153.0; // Coolest color temperature (~6500K)
pub const MIRED_MAX: f64 = 500.0; // Warmest color temperature (2000K)
pub const BRIGHTNESS_MIN: f64 = 75.0; // Night brightness floor
pub const BRIGHTNESS_MAX: f64 = 255.0; // Full brightness

// ═══ Fallback Output ═══
// Returned instead of an error when the fallback policy is selected

pub const BRIGHTNESS_ON_ERROR: f64 = 255.0;
pub const MIRED_ON_ERROR: f64 = 220.0;

// ═══ Curve Shape ═══
// Midpoints are hours of day. Time-to-max values are hours; a negative value
// makes the transition fall instead of rise.

pub const BRIGHTNESS_MORNING_MIDPOINT: f64 = 6.5;
pub const BRIGHTNESS_TIME_TO_REACH_MAX_MORNING: f64 = 0.5;
pub const BRIGHTNESS_EVENING_MIDPOINT: f64 = 22.0;
pub const BRIGHTNESS_TIME_TO_REACH_MAX_EVENING: f64 = -1.5;

pub const TEMP_SHIFT_SUNRISE: f64 = 0.0; // Hours added to sunrise for the color midpoint
pub const TEMP_TIME_TO_REACH_MAX_SUNRISE: f64 = 1.0;
pub const TEMP_SHIFT_SUNSET: f64 = 0.0; // Hours added to sunset for the color midpoint
pub const TEMP_TIME_TO_REACH_MAX_SUNSET: f64 = -2.0;

pub const HOURS_IN_DAY: f64 = 24.0;
pub const MINUTES_PER_HOUR: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// ═══ Behavior Defaults ═══

pub const DEFAULT_ERROR_POLICY: ErrorPolicy = ErrorPolicy::Reject;
pub const DEFAULT_CURVE_VARIANT: CurveVariant = CurveVariant::SwitchPoint;

// ═══ Validation Limits ═══
// Hard limits applied to configuration overrides

pub const MINIMUM_BRIGHTNESS: f64 = 0.0;
pub const MAXIMUM_BRIGHTNESS: f64 = 255.0;

// ═══ Command Line Defaults ═══

pub const DEFAULT_SUNRISE: &str = "07:00:00";
pub const DEFAULT_SUNSET: &str = "20:00:00";
pub const DEFAULT_SAMPLE_POINTS: usize = 200;
pub const MINIMUM_SAMPLE_POINTS: usize = 2;
pub const MAXIMUM_SAMPLE_POINTS: usize = 100_000;
pub const CONFIG_ENV_VAR: &str = "DAYLIGHTR_CONFIG";
pub const DEBUG_ENV_VAR: &str = "DAYLIGHTR_DEBUG";

// ═══ Exit Codes ═══

pub const EXIT_FAILURE: i32 = 1;
