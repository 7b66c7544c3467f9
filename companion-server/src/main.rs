//! VoiceCompanion backend - standalone binary

use clap::Parser;
use companion_server::{AppState, start_server_on};
use config::Settings;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides HOST)
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Log level, used when RUST_LOG is not set
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_env_file();
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut settings = Settings::from_env();
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(host) = args.host {
        settings.host = host;
    }

    tracing::info!("Starting VoiceCompanion backend ({})", settings.environment);
    settings.log_warnings();

    let state = AppState::from_settings(&settings).await?;
    let handle = start_server_on(&settings.host, settings.port, state).await?;

    tracing::info!("Health check available at {}/health", handle.url());

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    handle.shutdown().await;
    Ok(())
}
