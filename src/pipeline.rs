//! The scraping run: listing → title filter → downloads.
//!
//! Items are processed strictly in listing order, one at a time. Per-item
//! skips are reported as [`ItemOutcome`] values and never stop the run; a
//! failed listing request or a failed download aborts it with
//! [`PipelineError`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::download::filename::destination_filename;
use crate::download::{DownloadError, DownloadManager, DownloadOutcome, Fetch};
use crate::listing::{ListingError, ListingFetcher, ListingItem};
use crate::size::format_size;
use crate::title::{ResolutionMatch, extract_resolution, passes};

/// Fatal errors that end a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Listing could not be fetched or decoded.
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// An accepted image could not be downloaded.
    #[error("download of {url} failed: {source}")]
    Download {
        /// Image URL.
        url: String,
        /// Underlying failure.
        #[source]
        source: DownloadError,
    },
}

/// What happened to one listing item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// Title carries no `WxH` pattern.
    NoResolution,
    /// Resolution found but outside the configured criteria.
    Rejected {
        /// Parsed resolution.
        resolution: ResolutionMatch,
    },
    /// Accepted, but the URL names no file (no extension).
    NoExtension {
        /// Offending URL.
        url: String,
    },
    /// Destination file was already present.
    AlreadyExists {
        /// Existing file.
        path: PathBuf,
    },
    /// Image fetched and written.
    Downloaded {
        /// Written file.
        path: PathBuf,
        /// Body size in bytes.
        bytes: u64,
    },
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResolution => f.write_str("No matching resolution. Skipping."),
            Self::Rejected { .. } => f.write_str("Does not meet image specs. Skipping."),
            Self::NoExtension { url } => write!(f, "URL '{url}' is not a file. Skipping."),
            Self::AlreadyExists { path } => {
                write!(f, "File '{}' exists locally.", display_name(path))
            }
            Self::Downloaded { path, bytes } => {
                write!(f, "Saved '{}' ({}).", display_name(path), format_size(*bytes))
            }
        }
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

/// Per-outcome counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Items returned by the listing.
    pub listed: usize,
    /// Items downloaded during this run.
    pub downloaded: usize,
    /// Items whose file was already present.
    pub already_present: usize,
    /// Items without a resolution in the title.
    pub no_resolution: usize,
    /// Items rejected by the criteria.
    pub rejected: usize,
    /// Accepted items whose URL had no extension.
    pub no_extension: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::NoResolution => self.no_resolution += 1,
            ItemOutcome::Rejected { .. } => self.rejected += 1,
            ItemOutcome::NoExtension { .. } => self.no_extension += 1,
            ItemOutcome::AlreadyExists { .. } => self.already_present += 1,
            ItemOutcome::Downloaded { .. } => self.downloaded += 1,
        }
    }
}

/// Receives item-level events as the run progresses.
///
/// All methods default to doing nothing.
pub trait RunObserver {
    /// Called before an item is examined. `position` starts at 1.
    fn item_started(&mut self, _position: usize, _item: &ListingItem) {}

    /// Called when a resolution was parsed from the item title.
    fn resolution_found(&mut self, _item: &ListingItem, _resolution: &ResolutionMatch) {}

    /// Called once the item has been skipped or downloaded.
    fn item_finished(&mut self, _item: &ListingItem, _outcome: &ItemOutcome) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl RunObserver for SilentObserver {}

/// Drives one scraping run.
pub struct Pipeline<'a> {
    config: &'a Config,
    listings: ListingFetcher<'a>,
    downloads: DownloadManager<'a>,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline that issues every request through `fetcher`.
    ///
    /// The output directory must already exist.
    pub fn new(fetcher: &'a dyn Fetch, config: &'a Config) -> Self {
        Self {
            config,
            listings: ListingFetcher::new(fetcher),
            downloads: DownloadManager::new(fetcher, &config.output_dir, config.show_progress),
        }
    }

    /// Fetches the listing and processes every item in order.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Listing`] before any item is processed, or
    /// [`PipelineError::Download`] at the first failed download.
    #[instrument(skip_all, fields(listing = %self.config.listing))]
    pub async fn run(&self, observer: &mut dyn RunObserver) -> Result<RunSummary, PipelineError> {
        let items = self.listings.fetch_listing(self.config).await?;
        info!(items = items.len(), "Fetched listing");

        let mut summary = RunSummary {
            listed: items.len(),
            ..RunSummary::default()
        };

        for (index, item) in items.iter().enumerate() {
            observer.item_started(index + 1, item);
            let outcome = self.process_item(item, observer).await?;
            observer.item_finished(item, &outcome);
            summary.record(&outcome);
        }

        Ok(summary)
    }

    async fn process_item(
        &self,
        item: &ListingItem,
        observer: &mut dyn RunObserver,
    ) -> Result<ItemOutcome, PipelineError> {
        let Some(resolution) = extract_resolution(&item.title) else {
            debug!(title = %item.title, "no resolution in title");
            return Ok(ItemOutcome::NoResolution);
        };
        observer.resolution_found(item, &resolution);

        if !passes(&resolution, &self.config.criteria) {
            debug!(%resolution, ratio = resolution.ratio(), "outside criteria");
            return Ok(ItemOutcome::Rejected { resolution });
        }

        let Some(filename) = destination_filename(&item.title, &item.url) else {
            warn!(url = %item.url, "accepted item does not link to a file");
            return Ok(ItemOutcome::NoExtension {
                url: item.url.clone(),
            });
        };

        let outcome = self
            .downloads
            .ensure_downloaded(&item.url, &filename)
            .await
            .map_err(|source| PipelineError::Download {
                url: item.url.clone(),
                source,
            })?;

        Ok(match outcome {
            DownloadOutcome::AlreadyExists { path } => ItemOutcome::AlreadyExists { path },
            DownloadOutcome::Downloaded { path, bytes } => ItemOutcome::Downloaded { path, bytes },
        })
    }
}
