use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use database::PoolSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Embedded defaults, always the first configuration layer
const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Display name used in startup logs
    pub name: String,
    /// Deployment environment (development, production, ...)
    pub environment: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    pub listen_addr: String,
    /// Port number to listen on
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// SQLite file path, `sqlite://` URL or `:memory:`
    pub path: String,
    /// Maximum number of database connections in the pool
    pub max_connections: u32,
    /// Connection acquire timeout in seconds
    pub connection_timeout: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

/// Command line overrides, the last configuration layer
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub listen_addr: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load layered configuration:
    /// embedded defaults, then `config_file` (must exist when given), then
    /// `TODO_*` environment variables, then the plain variables
    /// `APP_NAME`, `APP_PORT`, `LOG_LEVEL`, `ENVIRONMENT`, `DATABASE_PATH`.
    pub fn load(config_file: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder().add_source(File::from_str(
            DEFAULT_CONFIG,
            FileFormat::Toml,
        ));

        if let Some(config_file) = config_file {
            builder = builder.add_source(
                File::with_name(config_file)
                    .required(true)
                    .format(FileFormat::Toml),
            );
        }

        // TODO_SERVER__PORT=8080 -> server.port
        builder = builder.add_source(
            Environment::with_prefix("TODO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        result.apply_standard_env_vars(|key| env::var(key).ok())?;

        Ok(result)
    }

    /// Apply the plain environment variables the service has always honored
    ///
    /// `lookup` resolves a variable name to its value.
    pub fn apply_standard_env_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("APP_NAME") {
            self.app.name = name;
        }

        if let Some(port) = lookup("APP_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid APP_PORT value: '{port}'"))?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(environment) = lookup("ENVIRONMENT") {
            self.app.environment = environment;
        }

        if let Some(path) = lookup("DATABASE_PATH") {
            self.database.path = path;
        }

        Ok(())
    }

    /// Apply command line overrides
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(listen_addr) = &overrides.listen_addr {
            self.server.listen_addr = listen_addr.clone();
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(path) = &overrides.database_path {
            self.database.path = path.clone();
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Database location as accepted by `SqliteTodoRepository::new`
    pub fn database_url(&self) -> &str {
        &self.database.path
    }

    /// Pool settings derived from the database section
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.database.max_connections,
            acquire_timeout: Duration::from_secs(self.database.connection_timeout),
        }
    }

    /// Get the server socket address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.listen_addr, self.server.port)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        if self.database.path.trim().is_empty() {
            return Err(anyhow::anyhow!("Database path cannot be empty"));
        }

        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if self.server.listen_addr.trim().is_empty() {
            return Err(anyhow::anyhow!("Server listen address cannot be empty"));
        }

        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!(
                "Database max_connections must be greater than 0"
            ));
        }

        if self.database.connection_timeout == 0 {
            return Err(anyhow::anyhow!(
                "Database connection_timeout must be greater than 0"
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig {
                name: "Todo API".to_string(),
                environment: "development".to_string(),
            },
            server: ServerConfig {
                listen_addr: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                path: "data/todo.db".to_string(),
                max_connections: 25,
                connection_timeout: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app.name, "Todo API");
        assert_eq!(config.app.environment, "development");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "data/todo.db");
        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_embedded_defaults_match_default_impl() {
        let config: Config = ConfigBuilder::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_server_address() {
        let mut config = Config::default();
        config.server.listen_addr = "127.0.0.1".to_string();
        assert_eq!(config.server_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_pool_settings() {
        let settings = Config::default().pool_settings();
        assert_eq!(settings.max_connections, 25);
        assert_eq!(settings.acquire_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());

        let mut invalid = Config::default();
        invalid.logging.level = "verbose".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = Config::default();
        invalid.server.port = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = Config::default();
        invalid.database.path = " ".to_string();
        assert!(invalid.validate().is_err());

        let mut invalid = Config::default();
        invalid.database.max_connections = 0;
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_standard_env_vars() {
        let mut config = Config::default();
        config
            .apply_standard_env_vars(lookup(&[
                ("APP_NAME", "Staging Todos"),
                ("APP_PORT", "8081"),
                ("LOG_LEVEL", "debug"),
                ("ENVIRONMENT", "staging"),
                ("DATABASE_PATH", "/tmp/todos.db"),
            ]))
            .unwrap();

        assert_eq!(config.app.name, "Staging Todos");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.app.environment, "staging");
        assert_eq!(config.database.path, "/tmp/todos.db");
    }

    #[test]
    fn test_invalid_app_port_is_error() {
        let mut config = Config::default();
        let result = config.apply_standard_env_vars(lookup(&[("APP_PORT", "eighty")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = Config::default();
        config.apply_overrides(&ConfigOverrides {
            listen_addr: Some("127.0.0.1".to_string()),
            port: Some(9000),
            database_path: Some(":memory:".to_string()),
            log_level: None,
        });

        assert_eq!(config.server_address(), "127.0.0.1:9000");
        assert_eq!(config.database_url(), ":memory:");
        assert_eq!(config.logging.level, "info");
    }
}
