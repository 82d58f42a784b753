//! Todo Core Library
//!
//! This crate provides the domain model, error taxonomy, repository trait and
//! business-rule service for the todo service. All other crates depend on the
//! types and interfaces defined here.
//!
//! # Architecture
//!
//! - [`models`] - The `Todo` entity, creation/update inputs and listing filter
//! - [`error`] - Error types and result handling
//! - [`repository`] - Repository trait for data persistence
//! - [`validation`] - Input validation rules
//! - [`service`] - Domain service enforcing invariants on top of a repository
//!
//! # Example
//!
//! ```rust
//! use todo_core::{models::NewTodo, validation::TodoValidator};
//!
//! let new_todo = NewTodo {
//!     due_date: Some("2024-01-15T10:00:00Z".to_string()),
//!     ..NewTodo::new("Renew passport")
//! };
//!
//! let due_date = TodoValidator::validate_new_todo(&new_todo).unwrap();
//! assert!(due_date.is_some());
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, ResultExt, TodoError};
pub use models::{
    format_timestamp, parse_timestamp, DueDateUpdate, NewTodo, Todo, TodoFilter, UpdateTodo,
};
pub use repository::TodoRepository;
pub use service::TodoService;
pub use validation::TodoValidator;

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
