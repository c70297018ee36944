use anyhow::Result;
use landscraper_core::listing::listing_url;
use landscraper_core::{HttpClient, Pipeline};
use tracing::{debug, info};

use crate::app::{console, terminal, validation};
use crate::cli::Args;

pub(crate) async fn run_landscraper() -> Result<()> {
    // Parse before tracing so --help and --version print without log noise
    let args = Args::parse_cli();
    terminal::init_tracing(args.default_log_level());
    debug!(?args, "CLI arguments parsed");

    let config = args.into_config();
    validation::prepare_output_dir(&config.output_dir)?;

    let client = HttpClient::new();
    info!(url = %listing_url(&config), "HTTP GET");

    let mut report = console::ConsoleObserver::stdout();
    let summary = Pipeline::new(&client, &config).run(&mut report).await?;

    info!(
        listed = summary.listed,
        downloaded = summary.downloaded,
        already_present = summary.already_present,
        skipped = summary.no_resolution + summary.rejected + summary.no_extension,
        "Run complete"
    );

    Ok(())
}
