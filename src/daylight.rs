//! Daylight curve assembly.
//!
//! This module ties the pieces together: it corrects the current time, picks
//! the governing phase for brightness and for color temperature independently,
//! evaluates the sigmoid of that phase and maps the factor into the output
//! ranges.
//!
//! ## Key Functionality
//! - **Brightness**: switch points come from the fixed shape, so the brightness
//!   curve ignores sunrise and sunset entirely
//! - **Color temperature**: switch points are derived from the supplied
//!   sunrise and sunset on every call
//! - **Error policy**: invalid day bounds either fail or produce the fallback pair
//! - **Variants**: the switch point assembly, or the legacy envelope that takes
//!   the minimum of both transitions

use chrono::NaiveTime;
use serde::Deserialize;

use crate::constants::{DEFAULT_CURVE_VARIANT, DEFAULT_ERROR_POLICY};
use crate::error::CurveError;
use crate::phase::{Phase, SwitchPoints, phase_factor};
use crate::shape::ShapeParams;
use crate::slope::Transition;
use crate::time_of_day::{hours_of_day, normalize_now};
use crate::utils::{brightness_to_percent, interpolate_f64, mired_to_kelvin};

/// What to do when sunset is not after sunrise.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Fail with `CurveError::InvalidBounds`.
    #[default]
    Reject,
    /// Return the fallback brightness and mired pair from the shape.
    Fallback,
}

impl ErrorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorPolicy::Reject => "reject",
            ErrorPolicy::Fallback => "fallback",
        }
    }
}

/// How the rising and falling transitions are combined.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurveVariant {
    /// Choose one transition per moment using day/night switch points,
    /// with wraparound for phases that straddle midnight.
    #[default]
    SwitchPoint,
    /// Take the minimum of both transitions. Kept for compatibility with
    /// older output; it does not handle evenings that run past midnight.
    Envelope,
}

impl CurveVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurveVariant::SwitchPoint => "switch_point",
            CurveVariant::Envelope => "envelope",
        }
    }
}

/// Target brightness and color temperature for one moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub brightness: f64, // Home Assistant brightness units
    pub mired: f64,
}

impl Lighting {
    pub fn kelvin(&self) -> f64 {
        mired_to_kelvin(self.mired)
    }

    pub fn brightness_percent(&self) -> f64 {
        brightness_to_percent(self.brightness)
    }
}

/// A validated curve ready to be evaluated.
///
/// Construction validates the shape, so evaluation itself can only fail on
/// caller input. The curve holds no mutable state and can be shared freely
/// between threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaylightCurve {
    shape: ShapeParams,
    policy: ErrorPolicy,
    variant: CurveVariant,
    brightness_switch: SwitchPoints,
}

impl DaylightCurve {
    pub fn new(
        shape: ShapeParams,
        policy: ErrorPolicy,
        variant: CurveVariant,
    ) -> Result<Self, CurveError> {
        shape.validate()?;
        let brightness_switch =
            SwitchPoints::new(&shape.brightness_morning, &shape.brightness_evening);
        Ok(Self {
            shape,
            policy,
            variant,
            brightness_switch,
        })
    }

    /// Curve with the reference shape, strict error policy and switch points.
    pub fn reference() -> Self {
        let shape = ShapeParams::reference();
        Self {
            brightness_switch: SwitchPoints::new(
                &shape.brightness_morning,
                &shape.brightness_evening,
            ),
            shape,
            policy: DEFAULT_ERROR_POLICY,
            variant: DEFAULT_CURVE_VARIANT,
        }
    }

    pub fn shape(&self) -> &ShapeParams {
        &self.shape
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn variant(&self) -> CurveVariant {
        self.variant
    }

    /// Brightness switch points; fixed for the lifetime of the curve.
    pub fn brightness_switch_points(&self) -> SwitchPoints {
        self.brightness_switch
    }

    /// Color temperature switch points for the given day bounds.
    pub fn color_temp_switch_points(&self, sunrise: f64, sunset: f64) -> SwitchPoints {
        SwitchPoints::new(&self.shape.temp_sunrise(sunrise), &self.shape.temp_sunset(sunset))
    }

    /// Whether `compute` answers with the fallback pair for these day bounds.
    pub fn falls_back(&self, sunrise: f64, sunset: f64) -> bool {
        self.policy == ErrorPolicy::Fallback && sunset <= sunrise
    }

    /// Compute the lighting target for `now`, all values in hours of day.
    ///
    /// `now` may be slightly negative or past 24h; it gets a single
    /// correction before evaluation. `sunset` must be later than `sunrise`,
    /// otherwise the configured error policy applies.
    pub fn compute(&self, sunrise: f64, sunset: f64, now: f64) -> Result<Lighting, CurveError> {
        check_finite("sunrise", sunrise)?;
        check_finite("sunset", sunset)?;
        check_finite("now", now)?;

        let now = normalize_now(now);

        if sunset <= sunrise {
            return match self.policy {
                ErrorPolicy::Reject => Err(CurveError::InvalidBounds { sunrise, sunset }),
                ErrorPolicy::Fallback => Ok(Lighting {
                    brightness: self.shape.fallback_brightness,
                    mired: self.shape.fallback_mired,
                }),
            };
        }

        let brightness_f = self.brightness_factor(now);
        let temp_f = self.color_temp_factor(sunrise, sunset, now);

        Ok(Lighting {
            brightness: interpolate_f64(
                self.shape.brightness_min,
                self.shape.brightness_max,
                brightness_f,
            ),
            mired: interpolate_f64(self.shape.mired_max, self.shape.mired_min, temp_f),
        })
    }

    /// Compute the lighting target from wall-clock times.
    pub fn compute_from_time(
        &self,
        sunrise: &NaiveTime,
        sunset: &NaiveTime,
        now: &NaiveTime,
    ) -> Result<Lighting, CurveError> {
        self.compute(hours_of_day(sunrise), hours_of_day(sunset), hours_of_day(now))
    }

    /// Normalized brightness factor at `now` (already corrected hours).
    /// 0.0 is the night floor, 1.0 full brightness.
    pub fn brightness_factor(&self, now: f64) -> f64 {
        let morning = &self.shape.brightness_morning;
        let evening = &self.shape.brightness_evening;
        match self.variant {
            CurveVariant::SwitchPoint => match self.brightness_switch.select(now) {
                (Phase::Rising, hours) => morning.factor(hours),
                (Phase::Falling, hours) => evening.factor(hours),
            },
            CurveVariant::Envelope => envelope(morning, evening, now),
        }
    }

    /// Normalized color temperature factor at `now` (already corrected hours).
    /// 0.0 is the warm night end, 1.0 the cool day end.
    pub fn color_temp_factor(&self, sunrise: f64, sunset: f64, now: f64) -> f64 {
        let rising = self.shape.temp_sunrise(sunrise);
        let falling = self.shape.temp_sunset(sunset);
        match self.variant {
            CurveVariant::SwitchPoint => phase_factor(&rising, &falling, now).1,
            CurveVariant::Envelope => envelope(&rising, &falling, now),
        }
    }
}

impl Default for DaylightCurve {
    fn default() -> Self {
        Self::reference()
    }
}

/// Compute the lighting target with the reference curve.
///
/// # Examples
/// ```
/// let noon = daylightr::compute(7.0, 20.0, 12.0).unwrap();
/// assert!(noon.brightness > 250.0);
/// assert!(noon.mired < 160.0);
/// assert!(daylightr::compute(10.0, 9.0, 12.0).is_err());
/// ```
pub fn compute(sunrise: f64, sunset: f64, now: f64) -> Result<Lighting, CurveError> {
    DaylightCurve::reference().compute(sunrise, sunset, now)
}

/// Compute the lighting target from wall-clock times with the reference curve.
pub fn compute_from_time(
    sunrise: &NaiveTime,
    sunset: &NaiveTime,
    now: &NaiveTime,
) -> Result<Lighting, CurveError> {
    DaylightCurve::reference().compute_from_time(sunrise, sunset, now)
}

fn envelope(rising: &Transition, falling: &Transition, now: f64) -> f64 {
    rising.factor(now).min(falling.factor(now))
}

fn check_finite(name: &'static str, value: f64) -> Result<(), CurveError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CurveError::NonFiniteInput { name, value })
    }
}
