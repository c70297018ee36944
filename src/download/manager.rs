//! Skip-if-present download management.
//!
//! A file already present under the destination name counts as downloaded,
//! which makes repeated runs idempotent.

use std::path::PathBuf;

use tracing::{debug, info};

use super::error::DownloadError;
use super::progress::ProgressLine;
use super::Fetch;
use crate::size::format_size;

/// Result of [`DownloadManager::ensure_downloaded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// A file with the destination name was already present; nothing was requested.
    AlreadyExists {
        /// Existing file.
        path: PathBuf,
    },
    /// The image was fetched and written.
    Downloaded {
        /// Written file.
        path: PathBuf,
        /// Body size in bytes.
        bytes: u64,
    },
}

/// Downloads images into one output directory, skipping existing files.
pub struct DownloadManager<'a> {
    fetcher: &'a dyn Fetch,
    output_dir: PathBuf,
    show_progress: bool,
}

impl<'a> DownloadManager<'a> {
    /// Creates a manager writing into `output_dir`.
    pub fn new(fetcher: &'a dyn Fetch, output_dir: impl Into<PathBuf>, show_progress: bool) -> Self {
        Self {
            fetcher,
            output_dir: output_dir.into(),
            show_progress,
        }
    }

    /// Ensures `filename` exists in the output directory, downloading `url` if needed.
    ///
    /// # Errors
    ///
    /// Propagates [`DownloadError`] from the fetcher, or `DownloadError::Io`
    /// when the existence check itself fails.
    pub async fn ensure_downloaded(
        &self,
        url: &str,
        filename: &str,
    ) -> Result<DownloadOutcome, DownloadError> {
        let path = self.output_dir.join(filename);

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DownloadError::io(path.clone(), e))?;
        if exists {
            debug!(path = %path.display(), "file exists locally, skipping request");
            return Ok(DownloadOutcome::AlreadyExists { path });
        }

        info!(url, "Downloading");
        let line = ProgressLine::new(self.show_progress);
        let result = self
            .fetcher
            .download(url, &path, &mut |read, total| line.update(read, total))
            .await;

        match result {
            Ok(bytes) => {
                line.finish();
                info!(path = %path.display(), size = %format_size(bytes), "download complete");
                Ok(DownloadOutcome::Downloaded { path, bytes })
            }
            Err(error) => {
                line.abandon();
                Err(error)
            }
        }
    }
}
