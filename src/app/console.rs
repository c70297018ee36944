//! Per-item report printed to stdout.

use std::io::{self, Write};

use landscraper_core::{ItemOutcome, ListingItem, ResolutionMatch, RunObserver};

const SEPARATOR_WIDTH: usize = 80;

/// Writes a separator, the title, the parsed resolution and the outcome of
/// every listing item.
pub(crate) struct ConsoleObserver<W: Write> {
    out: W,
}

impl ConsoleObserver<io::Stdout> {
    pub(crate) fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleObserver<W> {
    #[cfg(test)]
    fn new(out: W) -> Self {
        Self { out }
    }

    // Report lines are best-effort; a closed stdout must not abort downloads.
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }
}

pub(crate) fn resolution_line(resolution: &ResolutionMatch) -> String {
    format!(
        "Alleged resolution: {resolution}\tRatio: {:.2}",
        resolution.ratio()
    )
}

impl<W: Write> RunObserver for ConsoleObserver<W> {
    fn item_started(&mut self, _position: usize, item: &ListingItem) {
        self.line(&"-".repeat(SEPARATOR_WIDTH));
        self.line(&item.title);
    }

    fn resolution_found(&mut self, _item: &ListingItem, resolution: &ResolutionMatch) {
        self.line(&resolution_line(resolution));
    }

    fn item_finished(&mut self, _item: &ListingItem, outcome: &ItemOutcome) {
        self.line(&outcome.to_string());
    }
}
