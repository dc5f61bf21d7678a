//! Phase selection between a rising and a falling transition.
//!
//! Brightness and color temperature both combine two sigmoids: one that
//! rises in the morning and one that falls in the evening. Only one of them
//! governs any given moment. The day switch point sits between the two
//! midpoints; the night switch point sits between the falling midpoint and
//! the next day's rising midpoint, which usually lies past midnight.

use crate::constants::HOURS_IN_DAY;
use crate::slope::Transition;

/// Which transition governs the current moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Rising,  // Morning brightness ramp, or cool-down after sunrise
    Falling, // Evening dimming, or warm-up after sunset
}

/// Switch points derived from a rising/falling pair of transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchPoints {
    /// Rising governs before this point, falling after it.
    pub day: f64,
    /// Falling keeps governing until this point, which may exceed 24h.
    pub night: f64,
}

impl SwitchPoints {
    /// Derive switch points for a pair of transitions.
    ///
    /// Both points are pushed away from the midpoint average by the two
    /// time-to-max values. With the usual signs (rising positive, falling
    /// negative) this moves the day point toward the rising transition's
    /// plateau side and the night point later into the night.
    pub fn new(rising: &Transition, falling: &Transition) -> Self {
        let slopes = rising.time_to_max + falling.time_to_max;
        Self {
            day: (rising.midpoint + falling.midpoint) / 2.0 + slopes,
            night: (rising.midpoint + HOURS_IN_DAY + falling.midpoint) / 2.0 - slopes,
        }
    }

    /// Move `now` into the frame the comparison happens in.
    ///
    /// Early morning hours still belong to the previous evening's falling
    /// phase when the night switch lies past midnight, so they are compared
    /// as `now + 24`.
    pub fn unwrap_hours(&self, now: f64) -> f64 {
        if now + HOURS_IN_DAY < self.night {
            now + HOURS_IN_DAY
        } else {
            now
        }
    }

    /// Select the governing phase and return it together with the hours the
    /// chosen transition must be evaluated at.
    pub fn select(&self, now: f64) -> (Phase, f64) {
        let hours = self.unwrap_hours(now);
        if hours < self.day {
            (Phase::Rising, hours)
        } else {
            (Phase::Falling, hours)
        }
    }
}

/// Evaluate the governing transition of a rising/falling pair at `now`.
pub fn phase_factor(rising: &Transition, falling: &Transition, now: f64) -> (Phase, f64) {
    let switch = SwitchPoints::new(rising, falling);
    match switch.select(now) {
        (Phase::Rising, hours) => (Phase::Rising, rising.factor(hours)),
        (Phase::Falling, hours) => (Phase::Falling, falling.factor(hours)),
    }
}
