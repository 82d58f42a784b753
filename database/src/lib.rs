//! Database crate for the todo service
//!
//! This crate provides the SQLite implementation of the TodoRepository trait:
//! it owns the connection pool, applies the schema migrations and translates
//! between `Todo` values and rows.
//!
//! # Features
//!
//! - SQLite database support with WAL mode for file databases
//! - Embedded migrations via `sqlx::migrate!`
//! - Connection pooling shared by every request
//! - Store failures mapped to `TodoError::Persistence`
//! - In-memory database support for tests
//!
//! # Usage
//!
//! ```rust
//! use database::SqliteTodoRepository;
//! use todo_core::repository::TodoRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create repository (in-memory for testing)
//!     let repo = SqliteTodoRepository::new(":memory:").await?;
//!
//!     // Run migrations
//!     repo.migrate().await?;
//!
//!     // Repository is ready to use
//!     repo.health_check().await?;
//!     println!("Database is healthy!");
//!
//!     repo.close().await;
//!     Ok(())
//! }
//! ```

mod common;
mod sqlite;

pub use sqlite::{PoolSettings, SqliteTodoRepository};

// Re-export commonly used types from todo-core for convenience
pub use todo_core::{
    error::{Result, TodoError},
    models::{NewTodo, Todo, TodoFilter, UpdateTodo},
    repository::TodoRepository,
};
