//! CLI entry point for landscraper.

use anyhow::Result;

mod app;
mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    app::runtime::run_landscraper().await
}
