//! Constants for the download module.

/// HTTP connect timeout (30 seconds). No overall request timeout is applied.
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Suffix of the temporary file a download streams into before being renamed.
pub const PARTIAL_SUFFIX: &str = ".part";
