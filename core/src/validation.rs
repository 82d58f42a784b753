use chrono::{DateTime, Utc};

use crate::{
    error::{Result, TodoError},
    models::{parse_timestamp, DueDateUpdate, NewTodo, UpdateTodo},
};

/// Validation utilities for todo operations
pub struct TodoValidator;

impl TodoValidator {
    /// Validate a todo title
    ///
    /// Titles must not be empty or only whitespace.
    ///
    /// # Arguments
    /// * `title` - The title to validate
    ///
    /// # Returns
    /// * `Ok(())` - If the title is valid
    /// * `Err(TodoError::Validation)` - If the title is empty
    pub fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(TodoError::empty_field("title"));
        }
        Ok(())
    }

    /// Validate creation input and parse its due date.
    ///
    /// An absent or empty due date yields `None`.
    pub fn validate_new_todo(new_todo: &NewTodo) -> Result<Option<DateTime<Utc>>> {
        if new_todo.title.trim().is_empty() {
            return Err(TodoError::Validation("title is required".to_string()));
        }

        match new_todo.due_date.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => parse_timestamp(raw).map(Some),
        }
    }

    /// Validate a partial update.
    ///
    /// A supplied title must be non-empty, and a supplied due date must be
    /// empty (clear) or RFC 3339.
    pub fn validate_update(updates: &UpdateTodo) -> Result<DueDateUpdate> {
        if let Some(title) = &updates.title {
            Self::validate_title(title)?;
        }
        updates.due_date_update()
    }
}
