//! HTTP access for listings and image downloads.
//!
//! # Features
//!
//! - JSON fetch with charset-aware body decoding
//! - Streaming downloads into a temporary file, renamed on success
//! - Progress callback per received chunk
//! - Skip-if-exists download management
//!
//! Consumers depend on the [`Fetch`] trait rather than on [`HttpClient`]
//! directly, so tests can substitute an in-memory fake.
//!
//! # Example
//!
//! ```no_run
//! use landscraper_core::download::{DownloadManager, HttpClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let manager = DownloadManager::new(&client, "images", false);
//! let outcome = manager
//!     .ensure_downloaded("https://example.com/sunset.jpg", "Sunset.jpg")
//!     .await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
pub mod filename;
mod manager;
pub mod progress;

use std::path::Path;

use async_trait::async_trait;

pub use client::HttpClient;
pub use constants::{CONNECT_TIMEOUT_SECS, PARTIAL_SUFFIX};
pub use error::DownloadError;
pub use manager::{DownloadManager, DownloadOutcome};

/// The two HTTP operations the pipeline needs.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GETs `url` and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// [`DownloadError::HttpStatus`] for status 400 and above,
    /// [`DownloadError::Parse`] for malformed bodies, and
    /// [`DownloadError::Network`] / [`DownloadError::InvalidUrl`] for
    /// request failures.
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, DownloadError>;

    /// GETs `url` and writes the body to `destination`, returning bytes written.
    ///
    /// `on_progress(bytes_so_far, total_if_known)` is invoked before the first
    /// chunk and after every chunk. `destination` is untouched on failure.
    ///
    /// # Errors
    ///
    /// Same request errors as [`fetch_json`](Self::fetch_json), plus
    /// [`DownloadError::Io`] for filesystem failures.
    async fn download(
        &self,
        url: &str,
        destination: &Path,
        on_progress: &mut (dyn FnMut(u64, Option<u64>) + Send),
    ) -> Result<u64, DownloadError>;
}
