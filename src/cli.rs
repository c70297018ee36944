//! CLI argument definitions using clap derive macros.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, CommandFactory, FromArgMatches, Parser, ValueEnum};
use landscraper_core::config::{
    DEFAULT_BASE_URL, DEFAULT_MIN_WIDTH, DEFAULT_OUTPUT_DIR, DEFAULT_RATIO, DEFAULT_SUBREDDIT,
    DEFAULT_TOLERANCE,
};
use landscraper_core::{Config, Criteria, ListingKind};

/// Bringing you scenic desktop wallpapers courtesy of Reddit and its users.
///
/// Fetches one listing page, keeps posts whose title advertises a matching
/// resolution, and downloads them into the output directory. Files already
/// present are never downloaded again.
#[derive(Parser, Debug)]
#[command(name = "landscraper")]
#[command(author, version, about)]
pub struct Args {
    /// Output directory for images
    #[arg(short = 'd', long = "dir", default_value = DEFAULT_OUTPUT_DIR)]
    pub dir: PathBuf,

    /// Aspect ratio as decimal (e.g. 1.6)
    #[arg(short = 'a', value_name = "RATIO", default_value_t = DEFAULT_RATIO, value_parser = parse_non_negative)]
    pub ratio: f64,

    /// Aspect ratio absolute tolerance (e.g. 0.2)
    #[arg(short = 't', long = "tol", default_value_t = DEFAULT_TOLERANCE, value_parser = parse_non_negative)]
    pub tol: f64,

    /// Minimum resolution width as integer (e.g. 1024)
    #[arg(short = 'w', value_name = "WIDTH", default_value_t = DEFAULT_MIN_WIDTH)]
    pub width: u32,

    /// Listing to request
    #[arg(short = 'l', long, value_enum, default_value_t = ListingArg::Top)]
    pub listing: ListingArg,

    /// Query parameters for the listing API (e.g. limit=10)
    #[arg(short = 'p', long, num_args = 0.., value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Forum section to list
    #[arg(short = 's', long, default_value = DEFAULT_SUBREDDIT)]
    pub subreddit: String,

    /// Forum endpoint the listing path is appended to
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Suppress the progress line and informational logs
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (--verbose for debug, twice for trace)
    #[arg(long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Listing kinds accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingArg {
    Top,
    Hot,
    New,
    Random,
}

impl From<ListingArg> for ListingKind {
    fn from(value: ListingArg) -> Self {
        match value {
            ListingArg::Top => Self::Top,
            ListingArg::Hot => Self::Hot,
            ListingArg::New => Self::New,
            ListingArg::Random => Self::Random,
        }
    }
}

/// Full command definition. `-v` prints the version, so clap's built-in
/// `-V/--version` is replaced.
pub fn command() -> Command {
    Args::command().disable_version_flag(true).arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Print program name and version"),
    )
}

impl Args {
    /// Parses the process arguments, exiting on error, help or version.
    pub fn parse_cli() -> Self {
        Self::try_parse_cli(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Parses `args` (first item is the binary name).
    pub fn try_parse_cli<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }

    /// Log level used when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Converts parsed arguments into the immutable run configuration.
    pub fn into_config(self) -> Config {
        Config {
            output_dir: self.dir,
            criteria: Criteria {
                ratio: self.ratio,
                tolerance: self.tol,
                min_width: self.width,
            },
            listing: self.listing.into(),
            params: self.params,
            base_url: self.base_url,
            subreddit: self.subreddit,
            show_progress: !self.quiet,
        }
    }
}

fn parse_non_negative(value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a decimal number"))?;
    if parsed.is_finite() && parsed >= 0.0 {
        Ok(parsed)
    } else {
        Err(format!("'{value}' must be a finite, non-negative number"))
    }
}
