//! # Daylightr
//!
//! Brightness and color temperature targets that follow natural daylight.
//!
//! Given a sunrise, a sunset and the current time (all hours of day),
//! daylightr returns a smoothly varying brightness and a color temperature in
//! mireds for home lighting automation: dim and warm at night, bright and cool
//! around midday, with sigmoid transitions in between.
//!
//! ```
//! let lighting = daylightr::compute(7.0, 20.0, 12.0).unwrap();
//! assert!(lighting.brightness > 250.0);
//! ```
//!
//! ## Architecture
//!
//! - **time_of_day**: Wall-clock to fractional hours, correction of `now`
//! - **slope**: The tanh based transition function
//! - **phase**: Switch points and phase selection, including midnight wraparound
//! - **shape**: Immutable shape parameters and their validation
//! - **daylight**: Curve assembly, error policy and output mapping
//! - **utils**: Range mapping and unit conversions
//! - **sample**: Whole-day sampling for inspection
//! - **config**: Optional TOML overrides
//! - **constants**: Reference values
//! - **logger**: Structured console output
//! - **args**: Command-line parsing for the binary

pub mod args;
pub mod config;
pub mod constants;
pub mod daylight;
pub mod error;
pub mod logger;
pub mod phase;
pub mod sample;
pub mod shape;
pub mod slope;
pub mod time_of_day;
pub mod utils;

// Re-export important types for easier access
pub use config::Config;
pub use daylight::{
    CurveVariant, DaylightCurve, ErrorPolicy, Lighting, compute, compute_from_time,
};
pub use error::CurveError;
pub use logger::{Log, LogLevel};
pub use phase::{Phase, SwitchPoints};
pub use shape::ShapeParams;
pub use slope::{Transition, sloped_value};
pub use time_of_day::{hours_of_day, normalize_now};
