//! hubspot-dealflow - command-line entry point.
//!
//! Loads configuration from the environment, builds a client and runs one
//! subcommand against the HubSpot API.

use anyhow::Result;
use clap::Parser;
use hubspot_dealflow::cli::{self, Cli};
use hubspot_dealflow::{Config, HubspotClient};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Logs go to stderr so stdout carries only command output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Using HubSpot API at {}", config.api_base_url);

    let client = HubspotClient::new(config);
    let result = cli::run(cli, &client);

    let summary = client.metrics().summary();
    info!(
        "{} requests ({} failed), {:.1} ms average",
        summary.http_requests_total, summary.http_errors_total, summary.http_duration_avg_ms
    );

    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }
    result
}
