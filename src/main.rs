//! Token Risk Scanner - one-shot risk report for a Solana token
//!
//! Reads `rpc_url` and `contract_address` from the environment (or `.env`),
//! scans the token and prints the report to stdout. Logs go to stderr.

use config::ConfigError;
use std::io;
use token_risk_scanner::{AppConfig, ReportPrinter, TokenScanner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Token risk scan failed");
        return Err(e);
    }

    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = load_config()?;
    let mint = config.mint()?;
    tracing::info!(mint = %mint, "Configuration loaded");

    let scanner = TokenScanner::from_config(&config)?;
    let report = scanner.scan(&mint).await?;

    let stdout = io::stdout();
    let mut printer = ReportPrinter::new(stdout.lock());
    printer.print(&report)?;

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "token_risk_scanner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Load and validate configuration
fn load_config() -> anyhow::Result<AppConfig> {
    checked_config(AppConfig::load())
}

fn checked_config(loaded: Result<AppConfig, ConfigError>) -> anyhow::Result<AppConfig> {
    let config = loaded.map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    Ok(config)
}
