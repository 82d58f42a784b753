//! Todo Server Library
//!
//! This library provides the process-level pieces of the todo service:
//! layered configuration, telemetry, database bootstrap and server
//! construction. The `todo-server` and `todo-migrate` binaries are thin
//! wrappers around it.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::{Config, ConfigOverrides};
pub use setup::{
    create_repository, create_server, ensure_database_directory, initialize_app, run_migrations,
    App,
};
pub use telemetry::init_telemetry;
