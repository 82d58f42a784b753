//! Standard test fixtures for consistent testing
//!
//! Provides pre-built test data including:
//! - Standard todos and creation inputs
//! - The priority/completion ordering scenario
//! - Bulk todo generators

use chrono::{Duration, Utc};
use todo_core::{NewTodo, Todo, UpdateTodo};

use crate::builders::{NewTodoBuilder, TodoBuilder};

/// Due date used across round-trip tests
pub const SAMPLE_DUE_DATE: &str = "2024-01-15T10:00:00Z";

/// Create a basic test todo with sensible defaults
pub fn create_test_todo() -> Todo {
    TodoBuilder::new().build()
}

/// Create a basic creation input
pub fn create_new_todo() -> NewTodo {
    NewTodoBuilder::new().with_title("NEW-001").build()
}

/// Create a creation input carrying [`SAMPLE_DUE_DATE`]
pub fn create_new_todo_with_due_date() -> NewTodo {
    NewTodoBuilder::new()
        .with_title("Due soon")
        .with_due_date(SAMPLE_DUE_DATE)
        .build()
}

/// Update touching only the completion flag
pub fn complete_only_update() -> UpdateTodo {
    UpdateTodo {
        completed: Some(true),
        ..Default::default()
    }
}

/// Create multiple unique todos with distinct creation times
///
/// Todo `i` (1-based) has priority `i % 3` and is completed when `i` is even.
pub fn create_test_todos(count: usize) -> Vec<Todo> {
    let base = Utc::now() - Duration::hours(1);
    (1..=count)
        .map(|i| {
            TodoBuilder::new()
                .with_title(format!("Test Todo {i}"))
                .with_description(format!("Test todo number {i} for bulk testing"))
                .with_priority((i % 3) as i32)
                .completed(i % 2 == 0)
                .with_created_at(base + Duration::seconds(i as i64))
                .build()
        })
        .collect()
}

/// The listing scenario: A(priority 1, done), B(priority 5, done),
/// C(priority 3, open), created in that order.
///
/// Listing completed todos must yield `[B, A]`.
pub fn create_priority_scenario() -> Vec<NewTodo> {
    vec![
        NewTodoBuilder::new().with_title("A").with_priority(1).build(),
        NewTodoBuilder::new().with_title("B").with_priority(5).build(),
        NewTodoBuilder::new().with_title("C").with_priority(3).build(),
    ]
}

/// Whether a todo from [`create_priority_scenario`] ends up completed
pub fn scenario_completed(title: &str) -> bool {
    matches!(title, "A" | "B")
}
