//! Mock implementations and test utilities for the todo service
//!
//! This crate provides the shared testing infrastructure:
//! - An in-memory `TodoRepository` with error injection and call tracking
//! - Builders, fixtures and random data generators
//! - Custom assertion helpers
//! - Property-based testing strategies
//! - A repository contract suite every implementation must pass

pub mod assertions;
pub mod builders;
pub mod contracts;
pub mod fixtures;
pub mod generators;
pub mod repository;

pub use assertions::*;
pub use builders::*;
pub use contracts::*;
pub use fixtures::*;
pub use generators::*;
pub use repository::MockTodoRepository;
