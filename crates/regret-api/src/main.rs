//! Regret Archive API server entry point
//!
//! Run with:
//! ```bash
//! API_PORT=8080 cargo run -p regret-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use regret_common::{try_init_tracing_with_config, AppConfig, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // APP_ENV picks the log format before the full configuration is read
    let env = std::env::var("APP_ENV")
        .ok()
        .and_then(|s| Environment::parse(&s))
        .unwrap_or_default();
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting Regret Archive API Server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        persistent_store = config.database.is_some(),
        persistent_ledger = config.redis.is_some(),
        "Configuration loaded"
    );

    regret_api::run(config).await?;

    Ok(())
}
