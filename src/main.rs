//! Opsboard Server
//!
//! Run with: cargo run
//!
//! Configuration comes from a TOML file (`--config`, or the default
//! locations), with `OPSBOARD_*` environment variables and CLI flags
//! layered on top. `--print-default-config` emits a starter file.

use clap::Parser;
use opsboard::api::{serve, ApiConfig, AppState};
use opsboard::config::{generate_default_config, Config, LoggingConfig};
use opsboard::data::DataSource;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "opsboard", version, about = "Operational dashboard server")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(long)]
    port: Option<u16>,

    /// Override the CSV data source path
    #[arg(long)]
    source: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    // CLI flags beat both the file and the environment
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    if let Some(source) = cli.source {
        config.source.path = source.to_string_lossy().to_string();
    }

    init_tracing(&config.logging);

    tracing::info!("Starting Opsboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data source: {}", config.source.path);
    tracing::info!("Dashboard prefix: {}", config.dashboard.pathname_prefix);

    let source =
        DataSource::new(&config.source.path).with_date_format(&config.source.date_format);

    // Surface a bad data source at startup rather than on first navigation
    match source.load() {
        Ok(dataset) => tracing::info!("Data source loaded: {} rows", dataset.len()),
        Err(e) => tracing::warn!("Data source not loadable yet: {}", e),
    }

    let api_config = ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        pathname_prefix: config.dashboard.pathname_prefix.clone(),
        request_timeout_ms: config.api.request_timeout_secs * 1000,
    };

    let state = AppState::new(source, api_config.clone());
    serve(state, &api_config).await?;

    tracing::info!("Opsboard server stopped");
    Ok(())
}

/// Initialize tracing from the logging config, honoring RUST_LOG when set
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "opsboard={},tower_http=debug",
            logging.level
        ))
    });

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
