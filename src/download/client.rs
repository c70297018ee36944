//! HTTP client wrapper for listing fetches and image downloads.
//!
//! This module provides the `HttpClient` struct which handles JSON requests
//! and streaming downloads with error mapping and partial-file cleanup.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, PARTIAL_SUFFIX};
use super::error::DownloadError;
use super::Fetch;
use crate::user_agent;

/// HTTP client for listing and image requests.
///
/// Created once per run and reused for every request, taking advantage of
/// connection pooling.
///
/// # Example
///
/// ```no_run
/// use landscraper_core::download::HttpClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let listing = client
///     .get_json("http://www.reddit.com/r/EarthPorn/top.json")
///     .await?;
/// println!("{}", listing["data"]["children"][0]["data"]["title"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with the default connect timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_connect_timeout(CONNECT_TIMEOUT_SECS)
    }

    /// Creates a new HTTP client with an explicit connect timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_connect_timeout(connect_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches `url` and parses the body as JSON.
    ///
    /// The body is decoded with the charset declared in `Content-Type`,
    /// falling back to UTF-8.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The URL is invalid
    /// - The request fails at the transport level
    /// - The server returns status 400 or above
    /// - The body is not valid JSON
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value, DownloadError> {
        let response = self.send_get(url).await?;
        let body = response
            .text()
            .await
            .map_err(|e| DownloadError::network(url, e))?;
        debug!(bytes = body.len(), "received JSON body");
        serde_json::from_str(&body).map_err(|e| DownloadError::parse(url, e))
    }

    /// Streams `url` into `destination`, reporting progress per chunk.
    ///
    /// The body is written to a `.part` sibling first and renamed onto
    /// `destination` once complete. On any failure the temporary file is
    /// removed, so `destination` never holds a truncated image.
    ///
    /// # Errors
    ///
    /// Returns the same request errors as [`get_json`](Self::get_json), or
    /// `DownloadError::Io` when the file cannot be created, written or renamed.
    #[instrument(skip(self, on_progress), fields(url = %url, path = %destination.display()))]
    pub async fn download_to_path(
        &self,
        url: &str,
        destination: &Path,
        on_progress: &mut (dyn FnMut(u64, Option<u64>) + Send),
    ) -> Result<u64, DownloadError> {
        let response = self.send_get(url).await?;
        let total = response.content_length();
        debug!(?total, "starting body stream");

        let part_path = partial_path(destination);
        let file = File::create(&part_path)
            .await
            .map_err(|e| DownloadError::io(part_path.clone(), e))?;

        let streamed = stream_to_file(file, response, url, &part_path, total, on_progress).await;
        let finished = match streamed {
            Ok(bytes) => tokio::fs::rename(&part_path, destination)
                .await
                .map(|()| bytes)
                .map_err(|e| DownloadError::io(destination.to_path_buf(), e)),
            Err(error) => Err(error),
        };

        if finished.is_err() {
            debug!(path = %part_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&part_path).await;
        }

        finished
    }

    async fn send_get(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::network(url, e))?;

        let status = response.status().as_u16();
        if status >= 400 {
            debug!(status, "server returned error status");
            return Err(DownloadError::http_status(url, status));
        }

        Ok(response)
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, DownloadError> {
        self.get_json(url).await
    }

    async fn download(
        &self,
        url: &str,
        destination: &Path,
        on_progress: &mut (dyn FnMut(u64, Option<u64>) + Send),
    ) -> Result<u64, DownloadError> {
        self.download_to_path(url, destination, on_progress).await
    }
}

/// Temporary path a download streams into: `<destination>.part`.
pub(crate) fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(PARTIAL_SUFFIX);
    destination.with_file_name(name)
}

/// Streams response body to file, returning bytes written.
///
/// This is extracted to enable cleanup on error in the caller.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    total: Option<u64>,
    on_progress: &mut (dyn FnMut(u64, Option<u64>) + Send),
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    on_progress(bytes_written, total);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
        on_progress(bytes_written, total);
    }

    // Ensure all data is flushed to disk before the rename
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
