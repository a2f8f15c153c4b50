//! # Quill Seeder
//!
//! Operator CLI for the post store: runs migrations, loads the reference
//! fixtures and prints listings as JSON.

use clap::Parser;

mod args;
mod commands;
mod config;
mod state;
mod telemetry;

use args::Cli;
use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    telemetry::init_telemetry(&TelemetryConfig::from_env(cli.verbose));

    let config = AppConfig::from_env();
    tracing::debug!(
        database_configured = config.database.is_some(),
        "Configuration loaded"
    );

    let result = match AppState::new(config.database.as_ref()).await {
        Ok(state) => commands::execute(cli.command, &state).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
