//! Brew CRM — customer, supplier and loyalty management for a coffee shop.
//!
//! Main entry point that initializes the store and loyalty engine and starts the server.

use brew_api::ApiServer;
use brew_core::config::AppConfig;
use brew_loyalty::LoyaltyEngine;
use brew_management::{CafeStore, ManagementState};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Used when `RUST_LOG` is unset; every workspace crate logs at info.
const DEFAULT_LOG_FILTER: &str = "brew_crm=info,brew_api=info,brew_management=info,\
                                  brew_loyalty=info,brew_search=info,brew_core=info,\
                                  tower_http=info";

#[derive(Parser, Debug)]
#[command(name = "brew-crm")]
#[command(about = "Coffee shop CRM: customers, suppliers, menu and loyalty")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "BREW_CRM__NODE_ID")]
    node_id: Option<String>,

    /// Bind address (overrides config)
    #[arg(long, env = "BREW_CRM__API__HOST")]
    host: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "BREW_CRM__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Start with an empty store instead of the demo cafe
    #[arg(long, default_value_t = false)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Brew CRM starting up");

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if cli.no_seed {
        config.store.seed_demo_data = false;
    }

    info!(
        node_id = %config.node_id,
        host = %config.api.host,
        http_port = config.api.http_port,
        seed_demo_data = config.store.seed_demo_data,
        loyalty_enabled = config.loyalty.enabled,
        "Configuration loaded"
    );

    let state = ManagementState {
        store: Arc::new(CafeStore::new(&config.store)),
        loyalty: Arc::new(LoyaltyEngine::new(&config.loyalty)),
    };

    let api_server = ApiServer::new(config.clone(), state);

    if config.metrics.enabled {
        if let Err(e) = api_server.start_metrics().await {
            error!(error = %e, "Failed to start metrics exporter");
        }
    }

    info!("Brew CRM is ready to serve traffic");

    // Blocks until shutdown
    api_server.start_http().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        for target in [
            "brew_crm",
            "brew_api",
            "brew_management",
            "brew_loyalty",
            "brew_search",
            "brew_core",
        ] {
            assert!(
                DEFAULT_LOG_FILTER.contains(&format!("{target}=info")),
                "{target} missing from default filter"
            );
        }
    }
}
