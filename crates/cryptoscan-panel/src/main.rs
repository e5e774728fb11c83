//! CryptoScan control panel - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Headless CryptoScan control panel
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via CRYPTOSCAN_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    cryptoscan_panel::init_logging();

    info!("Starting CryptoScan panel v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > CRYPTOSCAN_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("CRYPTOSCAN_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = cryptoscan_panel::PanelConfig::load(&config_path)?;
    info!(api_base_url = %config.api_base_url, "Configuration loaded");

    let panel = cryptoscan_panel::Panel::new(config)?;
    panel.run().await?;

    Ok(())
}
