use anyhow::Context;
use std::io;
use stockyard_cli::{AppState, Menu};
use stockyard_store::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockyard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        Config::default()
    });
    tracing::info!(data_file = %config.warehouse.data_file, "Starting Stockyard");

    let state = AppState::from_config(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(stdin.lock(), stdout.lock(), state);
    menu.run().context("terminal I/O failed")?;

    Ok(())
}
