//! Resolution heuristics mined from post titles.
//!
//! Posters conventionally tag titles with the image size, e.g.
//! `"Sunset over hills [1920x1080]"`. Only the first `WxH`-looking substring
//! is considered; later candidates are never consulted. Width and height are
//! ASCII digit runs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Criteria;

static RESOLUTION_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?i)([0-9]+)\s*x\s*([0-9]+)"));

/// Compiles a regex at static init; panics on invalid pattern.
pub(crate) fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Width and height parsed from a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionMatch {
    /// Alleged width in pixels.
    pub width: u64,
    /// Alleged height in pixels, never zero.
    pub height: u64,
}

impl ResolutionMatch {
    /// Width divided by height.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for ResolutionMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Extracts the first `WxH` pattern from `title`.
///
/// Returns `None` when nothing matches, or when the first match cannot be a
/// resolution (zero height, numbers too large for `u64`).
#[must_use]
pub fn extract_resolution(title: &str) -> Option<ResolutionMatch> {
    let captures = RESOLUTION_RE.captures(title)?;
    let width = captures.get(1)?.as_str().parse::<u64>().ok()?;
    let height = captures.get(2)?.as_str().parse::<u64>().ok()?;
    (height > 0).then_some(ResolutionMatch { width, height })
}

/// Returns true when `resolution` satisfies `criteria`.
///
/// The tolerance bound is strict: a ratio exactly `tolerance` away is rejected.
#[must_use]
pub fn passes(resolution: &ResolutionMatch, criteria: &Criteria) -> bool {
    resolution.width >= u64::from(criteria.min_width)
        && (resolution.ratio() - criteria.ratio).abs() < criteria.tolerance
}
