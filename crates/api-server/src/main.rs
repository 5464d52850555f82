//! API Server binary entrypoint.

use api_server::{ApiServer, ServerConfig};
use clap::Parser;
use polymarket_core::config::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Polymarket wallet history API.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Host to bind to (overrides API_HOST).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT / API_PORT).
    #[arg(long)]
    port: Option<u16>,

    /// TOML configuration file. Without it, configuration comes from the environment.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "api_server=debug,portfolio_history=debug,polymarket_core=info,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let app_config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => {
            let config = Config::from_env();
            config.validate()?;
            config
        }
    };
    tracing::info!(
        data_api = %app_config.data_api.base_url,
        max_activity_pages = app_config.data_api.max_activity_pages,
        default_horizons = ?app_config.wallet.default_horizons,
        "Loaded configuration"
    );

    let mut server_config = ServerConfig::from_env();
    if let Some(host) = args.host {
        server_config.host = host;
    }
    if let Some(port) = args.port {
        server_config.port = port;
    }

    let server = ApiServer::new(server_config, app_config);
    server.run().await?;

    Ok(())
}
