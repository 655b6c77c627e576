use anyhow::Result;
use casos_iso::{
    api::HttpBackend,
    config,
    handlers::Handlers,
    session::Session,
    terminal::{self, Console},
};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // stdout belongs to the form, logs go to stderr
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Starting casos-iso client with log level: {}", log_level);

    let session = Session::from_config(&config.session)?;
    let backend = HttpBackend::new(&config.backend)?;
    info!("Using backend at {}", backend.base_url());

    let console = Arc::new(Console::stdout());
    let handlers = Handlers::new(
        session,
        Arc::new(backend),
        console.clone(),
        console.clone(),
    );

    terminal::run(handlers, console, BufReader::new(tokio::io::stdin())).await?;

    Ok(())
}
