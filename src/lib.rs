//! Landscraper Core Library
//!
//! Fetches one listing page of image posts from a forum JSON API, keeps the
//! posts whose title advertises a resolution matching the configured aspect
//! ratio and minimum width, and downloads those images into a directory.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Immutable run configuration and defaults
//! - [`download`] - HTTP client, skip-if-present downloads, progress line
//! - [`listing`] - Listing URL construction and JSON navigation
//! - [`title`] - Resolution extraction and acceptance criteria
//! - [`pipeline`] - The sequential run tying the stages together
//! - [`size`] - Human-readable byte counts

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub mod listing;
pub mod pipeline;
pub mod size;
pub mod title;
mod user_agent;

// Re-export commonly used types
pub use config::{Config, Criteria, ListingKind};
pub use download::{DownloadError, DownloadManager, DownloadOutcome, Fetch, HttpClient};
pub use listing::{ListingError, ListingFetcher, ListingItem};
pub use pipeline::{ItemOutcome, Pipeline, PipelineError, RunObserver, RunSummary, SilentObserver};
pub use size::format_size;
pub use title::{ResolutionMatch, extract_resolution, passes};
pub use user_agent::VERSION;
