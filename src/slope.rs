//! Saturating transition function.
//!
//! A transition is a `tanh` sigmoid centered on a midpoint. Its time-to-max
//! sets both the direction and the speed: positive values rise past the
//! midpoint, negative values fall, and the magnitude is roughly how many hours
//! the curve needs to get close to its asymptote.

/// Evaluate the sloped value of `x` for a transition centered on `midpoint`.
///
/// Returns a factor in `(0, 1)` that equals `0.5` exactly at the midpoint.
/// `max_after` must not be zero; shapes are validated before they reach here.
///
/// # Examples
/// ```
/// use daylightr::slope::sloped_value;
/// assert_eq!(sloped_value(7.0, 7.0, 1.0), 0.5);
/// assert!(sloped_value(12.0, 7.0, 1.0) > 0.99);
/// assert!(sloped_value(12.0, 7.0, -1.0) < 0.01);
/// ```
pub fn sloped_value(x: f64, midpoint: f64, max_after: f64) -> f64 {
    ((x - midpoint) / max_after).tanh() / 2.0 + 0.5
}

/// One sigmoid transition: where it is centered and how fast it saturates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub midpoint: f64,    // hours of day
    pub time_to_max: f64, // hours, negative for a falling transition
}

impl Transition {
    pub const fn new(midpoint: f64, time_to_max: f64) -> Self {
        Self {
            midpoint,
            time_to_max,
        }
    }

    /// Factor of this transition at `hours`.
    pub fn factor(&self, hours: f64) -> f64 {
        sloped_value(hours, self.midpoint, self.time_to_max)
    }

    pub fn is_rising(&self) -> bool {
        self.time_to_max > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sloped_value_midpoint_is_half() {
        assert_eq!(sloped_value(6.5, 6.5, 0.5), 0.5);
        assert_eq!(sloped_value(22.0, 22.0, -1.5), 0.5);
    }

    #[test]
    fn test_sloped_value_direction_follows_sign() {
        assert!(sloped_value(8.0, 7.0, 1.0) > 0.5);
        assert!(sloped_value(6.0, 7.0, 1.0) < 0.5);
        assert!(sloped_value(8.0, 7.0, -1.0) < 0.5);
        assert!(sloped_value(6.0, 7.0, -1.0) > 0.5);
    }

    #[test]
    fn test_sloped_value_symmetry() {
        let above = sloped_value(9.0, 7.0, 2.0);
        let below = sloped_value(5.0, 7.0, 2.0);
        assert!((above + below - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sloped_value_saturation_speed() {
        // Smaller magnitude saturates sooner
        let fast = sloped_value(8.0, 7.0, 0.5);
        let slow = sloped_value(8.0, 7.0, 2.0);
        assert!(fast > slow);
        assert!(fast > 0.98);
    }

    #[test]
    fn test_sloped_value_stays_in_unit_interval() {
        for i in 0..=240 {
            let x = f64::from(i) / 10.0;
            let v = sloped_value(x, 12.0, 3.0);
            assert!((0.0..=1.0).contains(&v), "x={} gave {}", x, v);
        }
    }

    #[test]
    fn test_transition_factor_and_direction() {
        let sunrise = Transition::new(7.0, 1.0);
        assert_eq!(sunrise.factor(7.0), 0.5);
        assert_eq!(sunrise.factor(8.0), sloped_value(8.0, 7.0, 1.0));
        assert!(sunrise.is_rising());
        assert!(!Transition::new(20.0, -2.0).is_rising());
    }
}
