//! Immutable curve shape configuration.
//!
//! `ShapeParams` bundles every constant that decides what the curves look
//! like. It is passed explicitly into the curve instead of being read from
//! globals, so callers can evaluate alternative shapes side by side.

use crate::constants::*;
use crate::error::CurveError;
use crate::slope::Transition;

/// Brightness and color temperature shape, plus the physical output ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParams {
    /// Rising brightness transition in the morning.
    pub brightness_morning: Transition,
    /// Falling brightness transition in the evening.
    pub brightness_evening: Transition,
    /// Hours added to sunrise to center the cool-down of color temperature.
    pub temp_sunrise_shift: f64,
    pub temp_sunrise_time_to_max: f64,
    /// Hours added to sunset to center the warm-up of color temperature.
    pub temp_sunset_shift: f64,
    pub temp_sunset_time_to_max: f64,
    pub brightness_min: f64,
    pub brightness_max: f64,
    pub mired_min: f64,
    pub mired_max: f64,
    /// Output pair used by the fallback error policy.
    pub fallback_brightness: f64,
    pub fallback_mired: f64,
}

impl ShapeParams {
    /// The reference shape. Output is only compatible with other
    /// implementations when these values are used unchanged.
    pub const fn reference() -> Self {
        Self {
            brightness_morning: Transition::new(
                BRIGHTNESS_MORNING_MIDPOINT,
                BRIGHTNESS_TIME_TO_REACH_MAX_MORNING,
            ),
            brightness_evening: Transition::new(
                BRIGHTNESS_EVENING_MIDPOINT,
                BRIGHTNESS_TIME_TO_REACH_MAX_EVENING,
            ),
            temp_sunrise_shift: TEMP_SHIFT_SUNRISE,
            temp_sunrise_time_to_max: TEMP_TIME_TO_REACH_MAX_SUNRISE,
            temp_sunset_shift: TEMP_SHIFT_SUNSET,
            temp_sunset_time_to_max: TEMP_TIME_TO_REACH_MAX_SUNSET,
            brightness_min: BRIGHTNESS_MIN,
            brightness_max: BRIGHTNESS_MAX,
            mired_min: MIRED_MIN,
            mired_max: MIRED_MAX,
            fallback_brightness: BRIGHTNESS_ON_ERROR,
            fallback_mired: MIRED_ON_ERROR,
        }
    }

    /// Color temperature transition centered on the (shifted) sunrise.
    pub fn temp_sunrise(&self, sunrise: f64) -> Transition {
        Transition::new(sunrise + self.temp_sunrise_shift, self.temp_sunrise_time_to_max)
    }

    /// Color temperature transition centered on the (shifted) sunset.
    pub fn temp_sunset(&self, sunset: f64) -> Transition {
        Transition::new(sunset + self.temp_sunset_shift, self.temp_sunset_time_to_max)
    }

    /// Check that every parameter can produce a finite curve.
    ///
    /// A zero time-to-max would divide by zero inside the sigmoid, so it is
    /// rejected here once instead of surfacing as NaN on every call.
    pub fn validate(&self) -> Result<(), CurveError> {
        let slopes = [
            ("brightness_morning_time_to_max", self.brightness_morning.time_to_max),
            ("brightness_evening_time_to_max", self.brightness_evening.time_to_max),
            ("temp_sunrise_time_to_max", self.temp_sunrise_time_to_max),
            ("temp_sunset_time_to_max", self.temp_sunset_time_to_max),
        ];
        for (parameter, value) in slopes {
            if !value.is_finite() {
                return Err(degenerate(parameter, format!("{} is not finite", value)));
            }
            if value == 0.0 {
                return Err(degenerate(parameter, "must not be zero".to_string()));
            }
        }

        let finite = [
            ("brightness_morning_midpoint", self.brightness_morning.midpoint),
            ("brightness_evening_midpoint", self.brightness_evening.midpoint),
            ("temp_sunrise_shift", self.temp_sunrise_shift),
            ("temp_sunset_shift", self.temp_sunset_shift),
            ("brightness_min", self.brightness_min),
            ("brightness_max", self.brightness_max),
            ("mired_min", self.mired_min),
            ("mired_max", self.mired_max),
            ("fallback_brightness", self.fallback_brightness),
            ("fallback_mired", self.fallback_mired),
        ];
        for (parameter, value) in finite {
            if !value.is_finite() {
                return Err(degenerate(parameter, format!("{} is not finite", value)));
            }
        }

        if self.brightness_min > self.brightness_max {
            return Err(degenerate(
                "brightness_min",
                format!(
                    "{} is greater than brightness_max {}",
                    self.brightness_min, self.brightness_max
                ),
            ));
        }
        if self.mired_min >= self.mired_max {
            return Err(degenerate(
                "mired_min",
                format!(
                    "{} must be lower than mired_max {}",
                    self.mired_min, self.mired_max
                ),
            ));
        }

        Ok(())
    }
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self::reference()
    }
}

fn degenerate(parameter: &'static str, reason: String) -> CurveError {
    CurveError::DegenerateShape { parameter, reason }
}
