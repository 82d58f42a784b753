use std::fmt::Display;

use thiserror::Error;

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;

/// Error taxonomy for the todo service.
///
/// Every layer (repository, service, HTTP handlers) speaks this type. Layers may
/// add context to the message as an error travels upward, but the variant is
/// never changed, so callers can always branch on the kind of failure.
///
/// # Examples
///
/// ```rust
/// use todo_core::error::TodoError;
///
/// let not_found = TodoError::not_found_id("3f1c");
/// assert!(not_found.is_not_found());
/// assert_eq!(not_found.status_code(), 404);
///
/// let with_context = not_found.context("deleting todo");
/// assert!(with_context.is_not_found());
/// assert_eq!(with_context.to_string(), "Not found: deleting todo: todo '3f1c'");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// Caller-supplied data violates a rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced todo does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store is unreachable or rejected the operation
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal system error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    /// Create a not found error for a todo ID
    pub fn not_found_id(id: &str) -> Self {
        Self::NotFound(format!("todo '{id}'"))
    }

    /// Create a validation error for a required field that was left empty
    pub fn empty_field(field: &str) -> Self {
        Self::Validation(format!("Field '{field}' cannot be empty"))
    }

    /// Create a validation error for a due date that is not RFC 3339
    pub fn invalid_due_date(value: &str, reason: impl Display) -> Self {
        Self::Validation(format!("invalid due date format '{value}': {reason}"))
    }

    /// Prefix the message with `context`, keeping the error kind.
    pub fn context(self, context: impl Display) -> Self {
        match self {
            Self::Validation(msg) => Self::Validation(format!("{context}: {msg}")),
            Self::NotFound(msg) => Self::NotFound(format!("{context}: {msg}")),
            Self::Persistence(msg) => Self::Persistence(format!("{context}: {msg}")),
            Self::Configuration(msg) => Self::Configuration(format!("{context}: {msg}")),
            Self::Internal(msg) => Self::Internal(format!("{context}: {msg}")),
        }
    }

    /// The message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::Persistence(msg)
            | Self::Configuration(msg)
            | Self::Internal(msg) => msg,
        }
    }

    /// Check if this error indicates a not found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::NotFound(_))
    }

    /// Check if this error indicates a validation problem
    pub fn is_validation(&self) -> bool {
        matches!(self, TodoError::Validation(_))
    }

    /// Check if this error indicates a store problem
    pub fn is_persistence(&self) -> bool {
        matches!(self, TodoError::Persistence(_))
    }

    /// Convert to appropriate HTTP status code equivalent
    pub fn status_code(&self) -> u16 {
        match self {
            TodoError::Validation(_) => 400,
            TodoError::NotFound(_) => 404,
            TodoError::Persistence(_) => 500,
            TodoError::Configuration(_) => 500,
            TodoError::Internal(_) => 500,
        }
    }
}

/// Attach context to the error side of a [`Result`] without changing its kind.
pub trait ResultExt<T> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display,
        F: FnOnce() -> C;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.context(f()))
    }
}
