//! Command-line argument parsing.
//!
//! The binary is an inspection tool around the curve: print the target for
//! one moment, sample a whole day, or write a default configuration file.
//! Parsing is separated from execution so it can be tested without running
//! anything.

use chrono::NaiveTime;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::constants::{DEFAULT_SAMPLE_POINTS, MAXIMUM_SAMPLE_POINTS, MINIMUM_SAMPLE_POINTS};
use crate::sample::SampleFormat;
use crate::time_of_day::parse_time_of_day;

#[derive(Debug, Parser)]
#[command(
    name = "daylightr",
    version,
    about = "Daylight-following brightness and color temperature targets"
)]
struct Cli {
    /// Configuration file overriding the reference curve shape
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print brightness and color temperature for one moment
    Now {
        #[command(flatten)]
        bounds: DayBounds,
        /// Time to evaluate (default: current local time)
        #[arg(long, value_parser = parse_time_of_day, value_name = "TIME")]
        at: Option<NaiveTime>,
    },
    /// Sample the curves over a whole day
    Sample {
        #[command(flatten)]
        bounds: DayBounds,
        /// Number of evenly spaced samples from 00:00 to 24:00
        #[arg(long, default_value_t = DEFAULT_SAMPLE_POINTS, value_parser = parse_points)]
        points: usize,
        #[arg(long, value_enum, default_value_t = FormatArg::Table)]
        format: FormatArg,
    },
    /// Write a default configuration file
    InitConfig {
        /// Destination (default: the standard configuration path)
        path: Option<PathBuf>,
    },
}

#[derive(Debug, clap::Args)]
struct DayBounds {
    /// Sunrise as HH:MM[:SS] (default: from configuration)
    #[arg(long, value_parser = parse_time_of_day, value_name = "TIME")]
    sunrise: Option<NaiveTime>,
    /// Sunset as HH:MM[:SS] (default: from configuration)
    #[arg(long, value_parser = parse_time_of_day, value_name = "TIME")]
    sunset: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Table,
    Csv,
}

impl From<FormatArg> for SampleFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Table => SampleFormat::Table,
            FormatArg::Csv => SampleFormat::Csv,
        }
    }
}

fn parse_points(value: &str) -> Result<usize, String> {
    let points: usize = value
        .parse()
        .map_err(|_| format!("invalid number of points '{}'", value))?;
    if !(MINIMUM_SAMPLE_POINTS..=MAXIMUM_SAMPLE_POINTS).contains(&points) {
        return Err(format!(
            "points must be between {} and {}",
            MINIMUM_SAMPLE_POINTS, MAXIMUM_SAMPLE_POINTS
        ));
    }
    Ok(points)
}

/// What the binary should do.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Print the lighting target for one moment
    Now {
        sunrise: Option<NaiveTime>,
        sunset: Option<NaiveTime>,
        at: Option<NaiveTime>,
    },
    /// Sample and print a whole day
    Sample {
        sunrise: Option<NaiveTime>,
        sunset: Option<NaiveTime>,
        points: usize,
        format: SampleFormat,
    },
    /// Write the default configuration file
    InitConfig { path: Option<PathBuf> },
}

/// Result of parsing command-line arguments.
#[derive(Debug, PartialEq)]
pub struct ParsedArgs {
    pub action: CliAction,
    pub debug_enabled: bool,
    pub config_path: Option<PathBuf>,
}

impl ParsedArgs {
    /// Parse command-line arguments, including the program name.
    ///
    /// Without a subcommand the binary behaves like `now`. Help, version and
    /// usage errors come back as `clap::Error`, which the caller prints and
    /// exits with.
    pub fn parse<I, S>(args: I) -> Result<ParsedArgs, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;

        let action = match cli.command {
            None => CliAction::Now {
                sunrise: None,
                sunset: None,
                at: None,
            },
            Some(Command::Now { bounds, at }) => CliAction::Now {
                sunrise: bounds.sunrise,
                sunset: bounds.sunset,
                at,
            },
            Some(Command::Sample {
                bounds,
                points,
                format,
            }) => CliAction::Sample {
                sunrise: bounds.sunrise,
                sunset: bounds.sunset,
                points,
                format: format.into(),
            },
            Some(Command::InitConfig { path }) => CliAction::InitConfig { path },
        };

        Ok(ParsedArgs {
            action,
            debug_enabled: cli.debug,
            config_path: cli.config,
        })
    }
}
