//! Apply database migrations and exit

use anyhow::{Context, Result};
use clap::Parser;
use todo_server::{
    config::{Config, ConfigOverrides},
    setup::run_migrations,
    telemetry::{init_telemetry, PerformanceTimer},
};
use tracing::info;

#[derive(Parser)]
#[command(name = "todo-migrate")]
#[command(about = "Run todo database migrations")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Database path override
    #[arg(long)]
    database_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config =
        Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.apply_overrides(&ConfigOverrides {
        database_path: cli.database_path,
        ..Default::default()
    });
    config.validate().context("Invalid configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;

    info!(database_path = %config.database.path, "Running migrations");
    let timer = PerformanceTimer::new("migrations");
    run_migrations(&config)
        .await
        .context("Failed to run migrations")?;
    timer.finish();

    info!("Migrations completed successfully");
    Ok(())
}
