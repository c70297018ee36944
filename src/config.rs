//! Immutable run configuration.
//!
//! A [`Config`] is built once from the command line and shared read-only by
//! every stage of the pipeline.

use std::fmt;
use std::path::PathBuf;

/// Default output directory for downloaded images.
pub const DEFAULT_OUTPUT_DIR: &str = "images";

/// Default target aspect ratio (16:10).
pub const DEFAULT_RATIO: f64 = 1.6;

/// Default absolute tolerance around the target ratio.
pub const DEFAULT_TOLERANCE: f64 = 0.2;

/// Default minimum pixel width (no minimum).
pub const DEFAULT_MIN_WIDTH: u32 = 0;

/// Default forum endpoint.
pub const DEFAULT_BASE_URL: &str = "http://www.reddit.com";

/// Default forum section to list.
pub const DEFAULT_SUBREDDIT: &str = "EarthPorn";

/// Listing kinds offered by the forum API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ListingKind {
    /// Highest scored posts.
    #[default]
    Top,
    /// Currently trending posts.
    Hot,
    /// Most recent posts.
    New,
    /// A single random post.
    Random,
}

impl ListingKind {
    /// Path segment used in the listing URL.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Hot => "hot",
            Self::New => "new",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acceptance criteria applied to a parsed title resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criteria {
    /// Target width / height ratio.
    pub ratio: f64,
    /// Maximum absolute distance from `ratio`, exclusive.
    pub tolerance: f64,
    /// Minimum accepted width in pixels, inclusive.
    pub min_width: u32,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_RATIO,
            tolerance: DEFAULT_TOLERANCE,
            min_width: DEFAULT_MIN_WIDTH,
        }
    }
}

/// Parameters for one scraping run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory receiving the images; every destination is resolved against it.
    pub output_dir: PathBuf,
    /// Resolution filter.
    pub criteria: Criteria,
    /// Which listing to request.
    pub listing: ListingKind,
    /// Extra `key=value` query parameters, in command-line order.
    pub params: Vec<String>,
    /// Forum endpoint, e.g. `http://www.reddit.com`.
    pub base_url: String,
    /// Forum section, e.g. `EarthPorn`.
    pub subreddit: String,
    /// Whether downloads draw a progress line.
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            criteria: Criteria::default(),
            listing: ListingKind::default(),
            params: Vec::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            subreddit: DEFAULT_SUBREDDIT.to_string(),
            show_progress: true,
        }
    }
}
