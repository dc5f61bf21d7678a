use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use daylightr::config::default_config_content;
use daylightr::constants::CONFIG_ENV_VAR;
use daylightr::sample::{SampleFormat, render, sample_day};
use daylightr::{Config, CurveError, CurveVariant, DaylightCurve, ErrorPolicy};

fn create_test_config_file(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("daylightr").join("daylightr.toml");

    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, content).unwrap();

    (temp_dir, config_path)
}

#[test]
fn test_integration_reference_config_file() {
    let (_temp_dir, config_path) = create_test_config_file(&default_config_content());

    let config = Config::load_from_path(&config_path).unwrap();
    let curve = config.curve().unwrap();

    assert_eq!(curve, DaylightCurve::reference());
    let sunrise = config.sunrise_time().unwrap();
    let sunset = config.sunset_time().unwrap();
    let noon = chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap();
    let lighting = curve.compute_from_time(&sunrise, &sunset, &noon).unwrap();
    assert!(lighting.brightness > 254.0);
    assert!(lighting.mired < 154.0);
}

#[test]
fn test_integration_fallback_policy_from_config() {
    let (_temp_dir, config_path) = create_test_config_file(
        r#"
on_invalid_bounds = "fallback"
fallback_brightness = 128.0
fallback_mired = 300.0
"#,
    );

    let curve = Config::load_from_path(&config_path).unwrap().curve().unwrap();
    assert_eq!(curve.policy(), ErrorPolicy::Fallback);

    let lighting = curve.compute(21.0, 6.0, 12.0).unwrap();
    assert_eq!(lighting.brightness, 128.0);
    assert_eq!(lighting.mired, 300.0);

    // Valid bounds are unaffected by the policy
    let lighting = curve.compute(6.0, 21.0, 12.0).unwrap();
    assert!(lighting.brightness > 254.0);
}

#[test]
fn test_integration_envelope_variant_from_config() {
    let (_temp_dir, config_path) = create_test_config_file("variant = \"envelope\"\n");
    let curve = Config::load_from_path(&config_path).unwrap().curve().unwrap();
    assert_eq!(curve.variant(), CurveVariant::Envelope);

    // The envelope does not carry the evening past midnight, so both
    // variants agree at midday but differ in the small hours
    let reference = DaylightCurve::reference();
    let noon = curve.compute(7.0, 20.0, 12.0).unwrap();
    let reference_noon = reference.compute(7.0, 20.0, 12.0).unwrap();
    assert!((noon.mired - reference_noon.mired).abs() < 0.5);

    let late = curve.compute(7.0, 20.0, 1.0).unwrap();
    let reference_late = reference.compute(7.0, 20.0, 1.0).unwrap();
    assert!(late.mired > reference_late.mired);
}

#[test]
fn test_integration_custom_shape() {
    let (_temp_dir, config_path) = create_test_config_file(
        r#"
brightness_min = 1.0
brightness_max = 200.0
mired_min = 200.0
mired_max = 400.0
temp_sunrise_shift = 1.0
"#,
    );
    let curve = Config::load_from_path(&config_path).unwrap().curve().unwrap();

    // Color midpoint moves with the sunrise shift
    let at_shifted = curve.compute(7.0, 20.0, 8.0).unwrap();
    assert!((at_shifted.mired - 300.0).abs() < 1e-9);

    let samples = sample_day(&curve, 7.0, 20.0, 97).unwrap();
    for sample in &samples {
        assert!((1.0..=200.0).contains(&sample.lighting.brightness));
        assert!((200.0..=400.0).contains(&sample.lighting.mired));
    }
}

#[test]
fn test_integration_invalid_configs_rejected() {
    let cases = [
        "brightness_evening_time_to_max = 0.0",
        "brightness_max = 256.0",
        "mired_min = 500.0",
        "sunset = \"05:00:00\"",
        "on_invalid_bounds = \"ignore\"",
        "not_a_setting = true",
        "brightness_min = \"low\"",
    ];
    for content in cases {
        let (_temp_dir, config_path) = create_test_config_file(content);
        assert!(
            Config::load_from_path(&config_path).is_err(),
            "config should be rejected: {}",
            content
        );
    }
}

#[test]
fn test_integration_missing_explicit_file() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("nope.toml");
    let err = Config::load_from_path(&missing).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
#[serial]
fn test_integration_env_var_config_path() {
    let (_temp_dir, config_path) = create_test_config_file("brightness_min = 20.0\n");

    unsafe { std::env::set_var(CONFIG_ENV_VAR, &config_path) };
    let resolved = Config::get_config_path().unwrap();
    let config = Config::load().unwrap();
    unsafe { std::env::remove_var(CONFIG_ENV_VAR) };

    assert_eq!(resolved, config_path);
    assert_eq!(config.shape().brightness_min, 20.0);
}

#[test]
#[serial]
fn test_integration_missing_default_file_uses_reference() {
    let temp_dir = tempdir().unwrap();
    let absent = temp_dir.path().join("daylightr.toml");

    unsafe { std::env::set_var(CONFIG_ENV_VAR, &absent) };
    let config = Config::load();
    unsafe { std::env::remove_var(CONFIG_ENV_VAR) };

    let config = config.unwrap();
    assert_eq!(config, Config::default());
    assert!(!absent.exists(), "loading must not create a file");
}

#[test]
fn test_integration_create_default_config() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("nested").join("daylightr.toml");

    Config::create_default_config(&path).unwrap();
    let second = Config::create_default_config(&path);

    assert!(second.is_err(), "existing file must not be overwritten");
    let config = Config::load_from_path(&path).unwrap();
    assert_eq!(config.curve().unwrap(), DaylightCurve::reference());
}

#[test]
fn test_integration_sample_csv_output() {
    let curve = DaylightCurve::reference();
    let samples = sample_day(&curve, 7.0, 20.0, 25).unwrap();
    let csv = render(&samples, SampleFormat::Csv);

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 26);
    assert_eq!(lines[0], "hours,brightness,mired");
    assert!(lines[1].starts_with("0.0000,"));
    assert!(lines[25].starts_with("24.0000,"));

    let noon: Vec<f64> = lines[13].split(',').map(|v| v.parse().unwrap()).collect();
    assert_eq!(noon[0], 12.0);
    assert!(noon[1] > 254.0);
    assert!(noon[2] < 154.0);
}

#[test]
fn test_integration_sample_invalid_bounds() {
    let curve = DaylightCurve::reference();
    assert_eq!(
        sample_day(&curve, 10.0, 9.0, 10),
        Err(CurveError::InvalidBounds {
            sunrise: 10.0,
            sunset: 9.0
        })
    );
}
