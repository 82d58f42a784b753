use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TodoError};

/// A task item managed by the todo service.
///
/// `id`, `created_at` and `updated_at` are owned by the system: the id is a
/// random UUID assigned at creation and never reused, `created_at` never
/// changes, and `updated_at` moves forward on every successful mutation.
///
/// # Examples
///
/// ```rust
/// use todo_core::models::{NewTodo, Todo};
///
/// let todo = Todo::new(NewTodo::new("Write release notes"), None);
///
/// assert!(!todo.completed);
/// assert_eq!(todo.priority, 0);
/// assert_eq!(todo.created_at, todo.updated_at);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    /// Opaque unique identifier (UUID v4 text)
    pub id: String,
    /// Non-empty title
    pub title: String,
    /// Free text, may be empty
    pub description: String,
    /// Completion flag, toggles freely
    pub completed: bool,
    /// Sort key, higher first
    pub priority: i32,
    /// Optional deadline
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Build a fresh todo from creation input and an already-parsed due date.
    pub fn new(new_todo: NewTodo, due_date: Option<DateTime<Utc>>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: new_todo.title,
            description: new_todo.description,
            completed: false,
            priority: new_todo.priority,
            due_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data transfer object for creating new todos
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NewTodo {
    /// Required title
    pub title: String,
    /// Optional description, empty when omitted
    #[serde(default)]
    pub description: String,
    /// Optional priority, 0 when omitted
    #[serde(default)]
    pub priority: i32,
    /// Optional RFC 3339 due date; empty string means no due date
    #[serde(default)]
    pub due_date: Option<String>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Partial update for an existing todo.
///
/// Each field is independently optional and `None` means "leave unchanged".
/// `due_date` is kept as raw text because it carries three meanings: `None`
/// keeps the current value, `Some("")` clears it, and any other value must
/// parse as RFC 3339. Use [`UpdateTodo::due_date_update`] to resolve it.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<i32>,
    pub due_date: Option<String>,
}

impl UpdateTodo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the raw due-date field into an explicit change.
    pub fn due_date_update(&self) -> Result<DueDateUpdate> {
        match self.due_date.as_deref() {
            None => Ok(DueDateUpdate::Keep),
            Some("") => Ok(DueDateUpdate::Clear),
            Some(raw) => parse_timestamp(raw).map(DueDateUpdate::Set),
        }
    }

    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

/// What an update does to the due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDateUpdate {
    /// Field omitted
    Keep,
    /// Explicit empty value
    Clear,
    /// New value
    Set(DateTime<Utc>),
}

impl DueDateUpdate {
    /// Apply the change to a current value
    pub fn apply(self, current: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
        match self {
            DueDateUpdate::Keep => current,
            DueDateUpdate::Clear => None,
            DueDateUpdate::Set(value) => Some(value),
        }
    }
}

/// Filter criteria for listing todos.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoFilter {
    /// Only return todos whose `completed` flag matches
    pub completed: Option<bool>,
}

impl TodoFilter {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.completed.map_or(true, |c| todo.completed == c)
    }
}

/// Parse an RFC 3339 timestamp and normalize it to UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TodoError::invalid_due_date(value, e))
}

/// Render a timestamp in the wire format: RFC 3339, UTC, `Z` suffix,
/// fractional seconds only when present.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
