//! Wire types for the HTTP API
//!
//! Handles conversion between the domain types and the JSON shapes clients
//! send and receive. Timestamps go out as RFC 3339 in UTC with a `Z` suffix.

use serde::{Deserialize, Serialize};
use todo_core::{format_timestamp, NewTodo, Todo, TodoFilter};

use crate::error::ApiError;

/// Body of `POST /api/v1/todos`
///
/// A missing title deserializes to empty so it is reported by validation
/// rather than as a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateTodoParams {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl From<CreateTodoParams> for NewTodo {
    fn from(params: CreateTodoParams) -> Self {
        NewTodo {
            title: params.title,
            description: params.description.unwrap_or_default(),
            priority: params.priority.unwrap_or_default(),
            due_date: params.due_date,
        }
    }
}

/// Query string of `GET /api/v1/todos`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTodosParams {
    pub completed: Option<String>,
}

impl ListTodosParams {
    /// Resolve the query into a filter; an empty value means no filter
    pub fn to_filter(&self) -> Result<TodoFilter, ApiError> {
        match self.completed.as_deref().map(str::trim) {
            None | Some("") => Ok(TodoFilter::default()),
            Some(raw) => parse_completed(raw).map(TodoFilter::completed),
        }
    }
}

fn parse_completed(raw: &str) -> Result<bool, ApiError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ApiError::BadRequest(format!(
            "Invalid value for 'completed': '{raw}' (expected true, false, 1 or 0)"
        ))),
    }
}

/// Todo as rendered on the wire
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        TodoResponse {
            id: todo.id.clone(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            priority: todo.priority,
            due_date: todo.due_date.as_ref().map(format_timestamp),
            created_at: format_timestamp(&todo.created_at),
            updated_at: format_timestamp(&todo.updated_at),
        }
    }
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        TodoResponse::from(&todo)
    }
}

/// Error body: `{"success": false, "message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub time: String,
    pub version: String,
}
