//! Single-line download progress display.

use indicatif::{ProgressBar, ProgressStyle};

use crate::size::format_size;

/// Renders the progress text for `read` bytes out of an optional total.
///
/// A known, non-zero total shows a percentage; anything else shows the
/// running byte count.
#[must_use]
pub fn render_progress(read: u64, total: Option<u64>) -> String {
    match total {
        Some(total) if total > 0 => {
            let percent = u128::from(read) * 100 / u128::from(total);
            format!("[{percent:2}% of {}]", format_size(total))
        }
        _ => format!("[Downloading: {}]", format_size(read)),
    }
}

/// A progress line redrawn in place on stderr.
///
/// Drawing is skipped when stderr is not a terminal or when created hidden.
#[derive(Debug)]
pub struct ProgressLine {
    bar: ProgressBar,
}

impl ProgressLine {
    /// Creates a progress line; `visible = false` draws nothing.
    #[must_use]
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(
            ProgressStyle::with_template("{msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self { bar }
    }

    /// Redraws the line for the latest byte counts.
    pub fn update(&self, read: u64, total: Option<u64>) {
        self.bar.set_message(render_progress(read, total));
    }

    /// Leaves the final state on screen.
    pub fn finish(&self) {
        self.bar.finish();
    }

    /// Stops drawing after a failed download, keeping the last state visible.
    pub fn abandon(&self) {
        self.bar.abandon();
    }

    /// Current rendered text.
    #[must_use]
    pub fn message(&self) -> String {
        self.bar.message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_progress_known_total() {
        assert_eq!(render_progress(512, Some(2048)), "[25% of 2.00KB]");
        assert_eq!(render_progress(0, Some(1_048_576)), "[ 0% of 1.00MB]");
        assert_eq!(render_progress(2048, Some(2048)), "[100% of 2.00KB]");
    }

    #[test]
    fn test_render_progress_truncates_percentage() {
        assert_eq!(render_progress(999, Some(1000)), "[99% of 1000.00 bytes]");
    }

    #[test]
    fn test_render_progress_unknown_total() {
        assert_eq!(render_progress(2048, None), "[Downloading: 2.00KB]");
    }

    #[test]
    fn test_render_progress_zero_total_treated_as_unknown() {
        assert_eq!(render_progress(500, Some(0)), "[Downloading: 500.00 bytes]");
    }

    #[test]
    fn test_hidden_progress_line_tracks_message() {
        let line = ProgressLine::new(false);
        line.update(1024, None);
        assert_eq!(line.message(), "[Downloading: 1.00KB]");
        line.finish();
    }
}
