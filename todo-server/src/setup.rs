use anyhow::{Context, Result};
use database::SqliteTodoRepository;
use std::path::Path;
use std::sync::Arc;
use todo_api::TodoServer;
use tracing::info;

use crate::config::Config;

/// Everything the server binary needs after bootstrap
pub struct App {
    pub server: TodoServer<SqliteTodoRepository>,
    /// Kept so the pool can be closed once the server stops
    pub repository: Arc<SqliteTodoRepository>,
}

/// Open the pool and apply migrations
pub async fn create_repository(config: &Config) -> Result<Arc<SqliteTodoRepository>> {
    let database_url = config.database_url();
    info!(database_url = %database_url, "Initializing SQLite repository");

    let repo = SqliteTodoRepository::with_settings(database_url, config.pool_settings())
        .await
        .context("Failed to create SQLite repository")?;

    info!("Running database migrations");
    repo.migrate()
        .await
        .context("Failed to run database migrations")?;

    info!("Todo repository created successfully");
    Ok(Arc::new(repo))
}

/// Create and configure the HTTP server
pub fn create_server(repository: Arc<SqliteTodoRepository>) -> TodoServer<SqliteTodoRepository> {
    TodoServer::new(repository).with_version(env!("CARGO_PKG_VERSION"))
}

/// Initialize the complete application
pub async fn initialize_app(config: &Config) -> Result<App> {
    info!("Initializing application");

    ensure_database_directory(config.database_url())
        .context("Failed to create database directory")?;

    let repository = create_repository(config)
        .await
        .context("Failed to create repository")?;

    let server = create_server(repository.clone());

    info!("Application initialized successfully");
    Ok(App { server, repository })
}

/// Run migrations against the configured database and close the pool
pub async fn run_migrations(config: &Config) -> Result<()> {
    ensure_database_directory(config.database_url())
        .context("Failed to create database directory")?;

    let repository = create_repository(config).await?;
    repository.close().await;
    Ok(())
}

/// Ensure the parent directory of a file database exists
///
/// New directories are created owner-only on Unix. In-memory databases
/// need nothing.
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    let db_path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);

    if db_path == ":memory:" {
        return Ok(());
    }

    let Some(parent) = Path::new(db_path).parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }

    info!("Creating database directory: {}", parent.display());
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {}", parent.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o700);
        std::fs::set_permissions(parent, permissions)
            .context("Failed to set directory permissions")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_database_directory_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("deeper").join("todo.db");

        ensure_database_directory(db_path.to_str().unwrap()).unwrap();

        assert!(db_path.parent().unwrap().is_dir());
        assert!(!db_path.exists());
    }

    #[test]
    fn test_ensure_database_directory_accepts_url_forms() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("url").join("todo.db");

        ensure_database_directory(&format!("sqlite://{}", db_path.display())).unwrap();
        assert!(db_path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_ensure_database_directory_skips_memory_and_bare_names() {
        ensure_database_directory(":memory:").unwrap();
        ensure_database_directory("sqlite::memory:").unwrap();
        ensure_database_directory("todo.db").unwrap();
    }
}
