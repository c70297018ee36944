//! User-Agent string sent with every listing and image request.
//!
//! Forum APIs throttle generic client identifiers, so all traffic carries the
//! tool name and crate version.

/// Crate version, shared by `--version` output and the User-Agent.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default User-Agent for listing and download requests.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    format!("landscraper/{VERSION}")
}
