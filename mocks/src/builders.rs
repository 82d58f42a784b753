//! Builder pattern implementations for easy test data construction
//!
//! Provides fluent builders for:
//! - Todo construction with sensible defaults
//! - NewTodo and UpdateTodo variants

use chrono::{DateTime, Utc};
use todo_core::{parse_timestamp, NewTodo, Todo, UpdateTodo};

/// Builder for constructing Todo instances in tests
pub struct TodoBuilder {
    todo: Todo,
}

impl Default for TodoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoBuilder {
    /// Create new builder with default values and a fresh id
    pub fn new() -> Self {
        Self {
            todo: Todo::new(
                NewTodo {
                    description: "A test todo".to_string(),
                    ..NewTodo::new("Test Todo")
                },
                None,
            ),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.todo.id = id.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.todo.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.todo.description = description.into();
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.todo.completed = completed;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.todo.priority = priority;
        self
    }

    /// Set the due date from RFC 3339 text
    ///
    /// # Panics
    /// Panics if `due_date` is not valid RFC 3339.
    pub fn with_due_date(mut self, due_date: &str) -> Self {
        self.todo.due_date = Some(parse_timestamp(due_date).expect("valid RFC 3339 due date"));
        self
    }

    /// Set both timestamps, as a freshly created todo would have
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.todo.created_at = created_at;
        self.todo.updated_at = created_at;
        self
    }

    pub fn build(self) -> Todo {
        self.todo
    }
}

/// Builder for constructing NewTodo instances in tests
pub struct NewTodoBuilder {
    new_todo: NewTodo,
}

impl Default for NewTodoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewTodoBuilder {
    pub fn new() -> Self {
        Self {
            new_todo: NewTodo {
                description: "A new todo".to_string(),
                ..NewTodo::new("New Todo")
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.new_todo.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.new_todo.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.new_todo.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.new_todo.due_date = Some(due_date.into());
        self
    }

    pub fn build(self) -> NewTodo {
        self.new_todo
    }
}

/// Builder for constructing UpdateTodo instances in tests
#[derive(Default)]
pub struct UpdateTodoBuilder {
    update: UpdateTodo,
}

impl UpdateTodoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.update.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.update.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.update.completed = Some(completed);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.update.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.update.due_date = Some(due_date.into());
        self
    }

    /// Explicitly clear the due date
    pub fn clear_due_date(mut self) -> Self {
        self.update.due_date = Some(String::new());
        self
    }

    pub fn build(self) -> UpdateTodo {
        self.update
    }
}
