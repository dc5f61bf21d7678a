//! Configuration loading and validation.
//!
//! Every curve parameter has a compiled-in reference value. A TOML file may
//! override any of them; fields that are absent keep the reference value, so
//! an empty file and no file at all behave the same.
//!
//! ## Configuration Location
//!
//! 1. An explicit path (`--config`)
//! 2. The `DAYLIGHTR_CONFIG` environment variable
//! 3. `~/.config/daylightr/daylightr.toml`
//!
//! An explicit path must exist. The default location is optional.
//!
//! ## Validation
//!
//! Overrides are checked once at load time. A configuration that would make
//! the curve divide by zero or invert an output range is rejected with a
//! message naming the offending key.

use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::daylight::{CurveVariant, DaylightCurve, ErrorPolicy};
use crate::logger::Log;
use crate::shape::ShapeParams;
use crate::slope::Transition;
use crate::time_of_day::{hours_of_day, parse_time_of_day};
use crate::utils::path_for_display;

/// Configuration loaded from `daylightr.toml`.
///
/// ## Configuration Categories
///
/// - **Day Bounds**: `sunrise`, `sunset` (defaults for the command line)
/// - **Behavior**: `on_invalid_bounds`, `variant`
/// - **Brightness Shape**: `brightness_*`
/// - **Color Temperature Shape**: `mired_*`, `temp_*`
/// - **Fallback Output**: `fallback_brightness`, `fallback_mired`
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub sunrise: Option<String>, // "HH:MM:SS" or "HH:MM"
    pub sunset: Option<String>,
    pub on_invalid_bounds: Option<ErrorPolicy>,
    pub variant: Option<CurveVariant>,
    pub brightness_min: Option<f64>,
    pub brightness_max: Option<f64>,
    pub brightness_morning_midpoint: Option<f64>, // hours
    pub brightness_morning_time_to_max: Option<f64>,
    pub brightness_evening_midpoint: Option<f64>, // hours
    pub brightness_evening_time_to_max: Option<f64>,
    pub mired_min: Option<f64>,
    pub mired_max: Option<f64>,
    pub temp_sunrise_shift: Option<f64>, // hours relative to sunrise
    pub temp_sunrise_time_to_max: Option<f64>,
    pub temp_sunset_shift: Option<f64>, // hours relative to sunset
    pub temp_sunset_time_to_max: Option<f64>,
    pub fallback_brightness: Option<f64>,
    pub fallback_mired: Option<f64>,
}

impl Config {
    /// Resolve the configuration path from the environment or the user's
    /// config directory.
    pub fn get_config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("daylightr").join("daylightr.toml"))
    }

    /// Load from a specific path. The file must exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Configuration file not found at specified path: {}",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Log::log_debug(&format!("Loaded configuration from {}", path_for_display(path)));
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config")?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load from the default location, falling back to reference values when
    /// no file exists there.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        if !config_path.exists() {
            Log::log_debug(&format!(
                "No configuration at {}, using reference values",
                path_for_display(&config_path)
            ));
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load from `path` when given, otherwise from the default location.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Build the shape parameters, applying overrides over reference values.
    pub fn shape(&self) -> ShapeParams {
        let reference = ShapeParams::reference();
        ShapeParams {
            brightness_morning: Transition::new(
                self.brightness_morning_midpoint
                    .unwrap_or(reference.brightness_morning.midpoint),
                self.brightness_morning_time_to_max
                    .unwrap_or(reference.brightness_morning.time_to_max),
            ),
            brightness_evening: Transition::new(
                self.brightness_evening_midpoint
                    .unwrap_or(reference.brightness_evening.midpoint),
                self.brightness_evening_time_to_max
                    .unwrap_or(reference.brightness_evening.time_to_max),
            ),
            temp_sunrise_shift: self.temp_sunrise_shift.unwrap_or(reference.temp_sunrise_shift),
            temp_sunrise_time_to_max: self
                .temp_sunrise_time_to_max
                .unwrap_or(reference.temp_sunrise_time_to_max),
            temp_sunset_shift: self.temp_sunset_shift.unwrap_or(reference.temp_sunset_shift),
            temp_sunset_time_to_max: self
                .temp_sunset_time_to_max
                .unwrap_or(reference.temp_sunset_time_to_max),
            brightness_min: self.brightness_min.unwrap_or(reference.brightness_min),
            brightness_max: self.brightness_max.unwrap_or(reference.brightness_max),
            mired_min: self.mired_min.unwrap_or(reference.mired_min),
            mired_max: self.mired_max.unwrap_or(reference.mired_max),
            fallback_brightness: self
                .fallback_brightness
                .unwrap_or(reference.fallback_brightness),
            fallback_mired: self.fallback_mired.unwrap_or(reference.fallback_mired),
        }
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.on_invalid_bounds.unwrap_or(DEFAULT_ERROR_POLICY)
    }

    pub fn curve_variant(&self) -> CurveVariant {
        self.variant.unwrap_or(DEFAULT_CURVE_VARIANT)
    }

    /// Build a validated curve from this configuration.
    pub fn curve(&self) -> Result<DaylightCurve> {
        DaylightCurve::new(self.shape(), self.error_policy(), self.curve_variant())
            .context("Invalid curve shape in configuration")
    }

    /// Configured sunrise, or the default.
    pub fn sunrise_time(&self) -> Result<NaiveTime> {
        parse_config_time("sunrise", self.sunrise.as_deref().unwrap_or(DEFAULT_SUNRISE))
    }

    /// Configured sunset, or the default.
    pub fn sunset_time(&self) -> Result<NaiveTime> {
        parse_config_time("sunset", self.sunset.as_deref().unwrap_or(DEFAULT_SUNSET))
    }

    /// Write a commented default configuration file.
    ///
    /// Fails if the file already exists so user settings are never replaced.
    pub fn create_default_config(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Refusing to overwrite existing configuration at {}",
                path.display()
            );
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        fs::write(path, default_config_content())
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;

        Log::log_decorated(&format!(
            "Created default configuration at {}",
            path_for_display(path)
        ));
        Ok(())
    }

    /// Log the effective settings.
    pub fn log_config(&self) {
        let shape = self.shape();
        Log::log_block_start("Loaded configuration");
        Log::log_indented(&format!(
            "Error policy: {}, variant: {}",
            self.error_policy().as_str(),
            self.curve_variant().as_str()
        ));
        Log::log_indented(&format!(
            "Brightness range: {} to {}",
            shape.brightness_min, shape.brightness_max
        ));
        Log::log_indented(&format!(
            "Brightness transitions: morning {}h ({:+}h), evening {}h ({:+}h)",
            shape.brightness_morning.midpoint,
            shape.brightness_morning.time_to_max,
            shape.brightness_evening.midpoint,
            shape.brightness_evening.time_to_max
        ));
        Log::log_indented(&format!(
            "Mired range: {} to {}",
            shape.mired_min, shape.mired_max
        ));
        Log::log_indented(&format!(
            "Color transitions: sunrise {:+}h ({:+}h), sunset {:+}h ({:+}h)",
            shape.temp_sunrise_shift,
            shape.temp_sunrise_time_to_max,
            shape.temp_sunset_shift,
            shape.temp_sunset_time_to_max
        ));
    }
}

fn parse_config_time(key: &str, value: &str) -> Result<NaiveTime> {
    parse_time_of_day(value)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Invalid {} time format", key))
}

/// Validate overrides before any curve is built from them.
pub fn validate_config(config: &Config) -> Result<()> {
    let shape = config.shape();

    // 1. Brightness must stay inside the Home Assistant range
    for (key, value) in [
        ("brightness_min", shape.brightness_min),
        ("brightness_max", shape.brightness_max),
        ("fallback_brightness", shape.fallback_brightness),
    ] {
        if !(MINIMUM_BRIGHTNESS..=MAXIMUM_BRIGHTNESS).contains(&value) {
            anyhow::bail!(
                "{} ({}) must be between {} and {}",
                key,
                value,
                MINIMUM_BRIGHTNESS,
                MAXIMUM_BRIGHTNESS
            );
        }
    }

    // 2. Mireds are inverse kelvin and must be positive
    for (key, value) in [
        ("mired_min", shape.mired_min),
        ("mired_max", shape.mired_max),
        ("fallback_mired", shape.fallback_mired),
    ] {
        if value.is_nan() || value <= 0.0 {
            anyhow::bail!("{} ({}) must be a positive number of mireds", key, value);
        }
    }

    // 3. Slopes, finiteness and range ordering
    shape
        .validate()
        .context("Invalid curve shape in configuration")?;

    // 4. Default day bounds for the command line
    let sunrise = config.sunrise_time()?;
    let sunset = config.sunset_time()?;
    if hours_of_day(&sunset) <= hours_of_day(&sunrise) {
        anyhow::bail!(
            "Sunset ({}) must be later than sunrise ({})",
            sunset.format("%H:%M:%S"),
            sunrise.format("%H:%M:%S")
        );
    }

    // 5. Transitions running backwards are legal but almost never intended
    let direction = [
        ("brightness_morning_time_to_max", shape.brightness_morning, true),
        ("brightness_evening_time_to_max", shape.brightness_evening, false),
        ("temp_sunrise_time_to_max", shape.temp_sunrise(0.0), true),
        ("temp_sunset_time_to_max", shape.temp_sunset(0.0), false),
    ];
    for (key, transition, rising) in direction {
        if transition.is_rising() != rising {
            Log::log_warning(&format!(
                "{} ({}) is expected to be {}; this transition will {} instead",
                key,
                transition.time_to_max,
                if rising { "positive" } else { "negative" },
                if rising { "fall" } else { "rise" }
            ));
        }
    }

    Ok(())
}

/// Builder for configuration files with aligned trailing comments.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{}]", title)));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{} = {}", key, value),
            comment: format!("# {}", comment),
        });
        self
    }

    fn build(self) -> String {
        let width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = Vec::new();
        for (i, entry) in self.entries.into_iter().enumerate() {
            match entry {
                ConfigEntry::Section(title) => {
                    if i > 0 {
                        lines.push(String::new());
                    }
                    lines.push(title);
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(width - line.len());
                    lines.push(format!("{}{}{}", line, padding, comment));
                }
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn float(value: f64) -> String {
    format!("{:.1}", value)
}

/// Content of the default configuration file. Every value equals the
/// compiled-in reference value.
pub fn default_config_content() -> String {
    ConfigBuilder::new()
        .add_section("Day bounds")
        .add_setting(
            "sunrise",
            &format!("\"{}\"", DEFAULT_SUNRISE),
            "Sunrise used when none is given",
        )
        .add_setting(
            "sunset",
            &format!("\"{}\"", DEFAULT_SUNSET),
            "Sunset used when none is given",
        )
        .add_section("Behavior")
        .add_setting(
            "on_invalid_bounds",
            &format!("\"{}\"", DEFAULT_ERROR_POLICY.as_str()),
            "\"reject\" or \"fallback\" when sunset is not after sunrise",
        )
        .add_setting(
            "variant",
            &format!("\"{}\"", DEFAULT_CURVE_VARIANT.as_str()),
            "\"switch_point\" or legacy \"envelope\"",
        )
        .add_section("Brightness")
        .add_setting("brightness_min", &float(BRIGHTNESS_MIN), "Night brightness (0-255)")
        .add_setting("brightness_max", &float(BRIGHTNESS_MAX), "Day brightness (0-255)")
        .add_setting(
            "brightness_morning_midpoint",
            &float(BRIGHTNESS_MORNING_MIDPOINT),
            "Hour at which the morning ramp is halfway",
        )
        .add_setting(
            "brightness_morning_time_to_max",
            &float(BRIGHTNESS_TIME_TO_REACH_MAX_MORNING),
            "Hours to saturate, positive rises",
        )
        .add_setting(
            "brightness_evening_midpoint",
            &float(BRIGHTNESS_EVENING_MIDPOINT),
            "Hour at which evening dimming is halfway",
        )
        .add_setting(
            "brightness_evening_time_to_max",
            &float(BRIGHTNESS_TIME_TO_REACH_MAX_EVENING),
            "Hours to saturate, negative falls",
        )
        .add_section("Color temperature")
        .add_setting("mired_min", &float(MIRED_MIN), "Coolest daytime mireds")
        .add_setting("mired_max", &float(MIRED_MAX), "Warmest nighttime mireds")
        .add_setting(
            "temp_sunrise_shift",
            &float(TEMP_SHIFT_SUNRISE),
            "Hours after sunrise of the cool-down midpoint",
        )
        .add_setting(
            "temp_sunrise_time_to_max",
            &float(TEMP_TIME_TO_REACH_MAX_SUNRISE),
            "Hours to saturate, positive rises",
        )
        .add_setting(
            "temp_sunset_shift",
            &float(TEMP_SHIFT_SUNSET),
            "Hours after sunset of the warm-up midpoint",
        )
        .add_setting(
            "temp_sunset_time_to_max",
            &float(TEMP_TIME_TO_REACH_MAX_SUNSET),
            "Hours to saturate, negative falls",
        )
        .add_section("Fallback output")
        .add_setting(
            "fallback_brightness",
            &float(BRIGHTNESS_ON_ERROR),
            "Used by the fallback policy",
        )
        .add_setting("fallback_mired", &float(MIRED_ON_ERROR), "Used by the fallback policy")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_reference_values() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.shape(), ShapeParams::reference());
        assert_eq!(config.error_policy(), ErrorPolicy::Reject);
        assert_eq!(config.curve_variant(), CurveVariant::SwitchPoint);
        assert_eq!(config.curve().unwrap(), DaylightCurve::reference());
    }

    #[test]
    fn test_default_config_content_round_trips_to_reference() {
        let content = default_config_content();
        let config = Config::from_toml_str(&content).unwrap();
        assert_eq!(config.shape(), ShapeParams::reference());
        assert_eq!(config.sunrise.as_deref(), Some(DEFAULT_SUNRISE));
        assert_eq!(config.sunset.as_deref(), Some(DEFAULT_SUNSET));
    }

    #[test]
    fn test_default_config_comments_aligned() {
        let content = default_config_content();
        let columns: Vec<usize> = content
            .lines()
            .filter(|line| !line.starts_with('#') && !line.is_empty())
            .filter_map(|line| line.find(" #"))
            .collect();
        assert!(!columns.is_empty());
        assert!(columns.iter().all(|c| *c == columns[0]), "{:?}", columns);
    }

    #[test]
    fn test_overrides_applied() {
        let config = Config::from_toml_str(
            r#"
on_invalid_bounds = "fallback"
variant = "envelope"
brightness_min = 10.0
temp_sunset_shift = -0.5
"#,
        )
        .unwrap();
        let shape = config.shape();
        assert_eq!(shape.brightness_min, 10.0);
        assert_eq!(shape.temp_sunset_shift, -0.5);
        assert_eq!(shape.brightness_max, BRIGHTNESS_MAX);
        assert_eq!(config.error_policy(), ErrorPolicy::Fallback);
        assert_eq!(config.curve_variant(), CurveVariant::Envelope);
    }

    #[test]
    fn test_zero_slope_rejected() {
        let err = Config::from_toml_str("temp_sunrise_time_to_max = 0.0").unwrap_err();
        assert!(format!("{:#}", err).contains("temp_sunrise_time_to_max"));
    }

    #[test]
    fn test_brightness_out_of_range_rejected() {
        assert!(Config::from_toml_str("brightness_max = 300.0").is_err());
        assert!(Config::from_toml_str("brightness_min = -1.0").is_err());
        assert!(Config::from_toml_str("brightness_min = 200.0\nbrightness_max = 100.0").is_err());
    }

    #[test]
    fn test_mired_range_rejected() {
        assert!(Config::from_toml_str("mired_min = 0.0").is_err());
        assert!(Config::from_toml_str("mired_min = 600.0").is_err());
    }

    #[test]
    fn test_day_bounds_validated() {
        assert!(Config::from_toml_str("sunrise = \"06:30\"\nsunset = \"21:00:00\"").is_ok());
        assert!(Config::from_toml_str("sunrise = \"noon\"").is_err());
        assert!(Config::from_toml_str("sunrise = \"21:00:00\"\nsunset = \"06:00:00\"").is_err());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::from_toml_str("night_temp = 3300").is_err());
        assert!(Config::from_toml_str("variant = \"linear\"").is_err());
    }

    #[test]
    fn test_sunrise_sunset_times_default() {
        let config = Config::default();
        assert_eq!(
            config.sunrise_time().unwrap(),
            NaiveTime::from_hms_opt(7, 0, 0).unwrap()
        );
        assert_eq!(
            config.sunset_time().unwrap(),
            NaiveTime::from_hms_opt(20, 0, 0).unwrap()
        );
    }
}
