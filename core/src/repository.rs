use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Todo, TodoFilter, UpdateTodo},
};

/// Repository trait for todo persistence and retrieval operations
///
/// The repository translates between [`Todo`] and stored rows and enforces no
/// business rules. Absence is reported as `Ok(None)` (or zero rows for
/// `delete`), never as an error; errors are reserved for failures to reach or
/// use the store. Implementations must be thread-safe and support concurrent
/// access.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Insert a new todo
    ///
    /// # Arguments
    /// * `todo` - The fully-populated todo, id and timestamps already assigned
    ///
    /// # Returns
    /// * `Ok(())` - The row was written
    /// * `Err(TodoError::Persistence)` - On constraint violation or store failure
    async fn create(&self, todo: &Todo) -> Result<()>;

    /// Get a todo by its ID
    ///
    /// # Returns
    /// * `Ok(Some(Todo))` - The todo if found
    /// * `Ok(None)` - If no todo exists with that ID
    /// * `Err(TodoError::Persistence)` - If the store operation fails
    async fn get_by_id(&self, id: &str) -> Result<Option<Todo>>;

    /// List todos, highest priority first, then newest first
    ///
    /// # Returns
    /// * `Ok(Vec<Todo>)` - The matching todos (may be empty)
    /// * `Err(TodoError::Persistence)` - If the store operation fails
    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>>;

    /// Apply a partial update
    ///
    /// Only present fields change. `updated_at` is refreshed even when no
    /// field is present.
    ///
    /// # Returns
    /// * `Ok(Some(Todo))` - The updated todo
    /// * `Ok(None)` - If no todo exists with that ID
    /// * `Err(TodoError::Validation)` - If the supplied due date does not parse
    /// * `Err(TodoError::Persistence)` - If the store operation fails
    async fn update(&self, id: &str, updates: UpdateTodo) -> Result<Option<Todo>>;

    /// Physically remove a todo
    ///
    /// # Returns
    /// * `Ok(rows)` - Rows affected; `0` when the ID did not exist
    /// * `Err(TodoError::Persistence)` - If the store operation fails
    async fn delete(&self, id: &str) -> Result<u64>;

    /// Check store connectivity
    async fn health_check(&self) -> Result<()>;
}
