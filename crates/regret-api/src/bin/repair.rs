//! Stored JSON repair pass
//!
//! Rewrites malformed reaction bundles and sliding doors records in the
//! PostgreSQL document store in canonical form, then prints a summary.
//!
//! ```bash
//! DATABASE_URL=postgresql://... API_PORT=0 cargo run -p regret-api --bin regret-repair
//! ```

use regret_api::build_service_context;
use regret_common::{try_init_tracing, AppConfig};
use regret_service::MaintenanceService;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Repair pass failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    if config.database.is_none() {
        anyhow::bail!("DATABASE_URL must be set; the in-memory store has nothing to repair");
    }

    let ctx = build_service_context(&config).await?;
    let report = MaintenanceService::new(&ctx).repair_stored_json().await?;

    info!(
        scanned = report.scanned,
        updated = report.updated,
        failed = report.failed,
        "Repair pass complete"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
