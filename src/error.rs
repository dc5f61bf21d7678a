//! Error types for curve evaluation.

use thiserror::Error;

/// Failures produced by the curve core.
///
/// `InvalidBounds` and `NonFiniteInput` come from caller input and are
/// deterministic. `DegenerateShape` can only come from a misconfigured shape
/// and is reported when a curve is built, never per call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("sunset ({sunset}h) must be later than sunrise ({sunrise}h)")]
    InvalidBounds { sunrise: f64, sunset: f64 },

    #[error("{name} must be a finite number of hours (got {value})")]
    NonFiniteInput { name: &'static str, value: f64 },

    #[error("shape parameter {parameter} is invalid: {reason}")]
    DegenerateShape {
        parameter: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bounds_message() {
        let err = CurveError::InvalidBounds {
            sunrise: 10.0,
            sunset: 9.0,
        };
        assert_eq!(
            err.to_string(),
            "sunset (9h) must be later than sunrise (10h)"
        );
    }

    #[test]
    fn test_degenerate_shape_message_names_parameter() {
        let err = CurveError::DegenerateShape {
            parameter: "temp_sunset_time_to_max",
            reason: "must not be zero".to_string(),
        };
        assert!(err.to_string().contains("temp_sunset_time_to_max"));
    }
}
