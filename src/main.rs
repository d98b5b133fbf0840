mod cli;

use std::io;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use cli::Cli;
use suno_harvest::config::HarvestConfig;
use suno_harvest::harvester::Harvester;
use suno_harvest::input::{parse_selection, prompt_selection, read_urls};
use suno_harvest::logging;

#[tokio::main]
async fn main() {
    let Some(cli) = Cli::from_args(std::env::args_os()) else {
        return;
    };
    if let Err(e) = logging::init_logging() {
        eprintln!("{e}");
    }

    // Failures are reported, never turned into a non-zero exit.
    if let Err(e) = run(cli).await {
        error!("❌ {e:#}");
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli);

    let urls = read_urls(&config.input.urls_file).await.context("reading URL list")?;
    if urls.is_empty() {
        error!("❌ No URLs found in the file.");
        return Ok(());
    }

    let selection = match cli.select.as_deref() {
        Some(list) => parse_selection(list),
        None => prompt_selection(io::stdin().lock(), io::stdout()).context("reading selection")?,
    };
    info!("Selected: {:?}", selection.selected());

    let harvester = Harvester::from_config(&config, selection).context("setting up HTTP client")?;
    harvester.run(&urls).await;
    Ok(())
}

fn load_config(cli: &Cli) -> HarvestConfig {
    let mut config = match &cli.config {
        Some(path) => HarvestConfig::load(path).unwrap_or_else(|e| {
            warn!("⚠️ Ignoring config {}: {e}", path.display());
            HarvestConfig::default()
        }),
        None => HarvestConfig::default(),
    };
    if let Some(urls) = &cli.urls {
        config.input.urls_file = urls.clone();
    }
    if let Some(output) = &cli.output {
        config.output.root = output.clone();
    }
    config
}
