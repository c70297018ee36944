//! Pre-flight checks that must pass before any network request.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

/// Makes sure `dir` is a usable output directory, creating it when missing.
///
/// An existing regular file at `dir` is a fatal configuration error.
pub(crate) fn prepare_output_dir(dir: &Path) -> Result<()> {
    if dir.is_file() {
        bail!("Path exists and is not a directory: {}", dir.display());
    }
    if !dir.is_dir() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create output directory {}", dir.display()))?;
        info!(dir = %dir.display(), "Created output directory");
    }
    Ok(())
}
