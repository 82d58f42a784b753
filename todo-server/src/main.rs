use anyhow::{Context, Result};
use clap::Parser;
use todo_server::{
    config::{Config, ConfigOverrides},
    setup::initialize_app,
    telemetry::{
        init_telemetry, log_config_validation, log_shutdown_info, log_startup_info, report_error,
    },
};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "todo-server")]
#[command(about = "Todo HTTP API server")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<String>,

    /// Listen address override
    #[arg(long)]
    listen_addr: Option<String>,

    /// Port override
    #[arg(short, long)]
    port: Option<u16>,

    /// Database path override
    #[arg(long)]
    database_path: Option<String>,

    /// Log level override
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            listen_addr: self.listen_addr.clone(),
            port: self.port,
            database_path: self.database_path.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(&cli.overrides());
    Ok(config)
}

/// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(&cli).context("Failed to load configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;

    log_config_validation(&config);
    if let Err(e) = config.validate() {
        error!(error = %e, "Refusing to start with invalid configuration");
        std::process::exit(1);
    }

    log_startup_info(&config);

    let app = match initialize_app(&config).await {
        Ok(app) => app,
        Err(e) => {
            report_error(&e, "startup");
            std::process::exit(2);
        }
    };

    let addr = config.server_address();
    let result = app.server.serve(&addr, shutdown_signal()).await;

    app.repository.close().await;

    match result {
        Ok(()) => {
            log_shutdown_info(&config);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, address = %addr, "Todo server error");
            std::process::exit(3);
        }
    }
}
