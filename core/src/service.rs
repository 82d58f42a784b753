//! Business rules on top of a [`TodoRepository`].
//!
//! The repository reports absence as `Ok(None)` / zero rows; this layer turns
//! absence into [`TodoError::NotFound`] so callers see one uniform signal.
//!
//! Updates and deletes check existence before mutating. That check is a
//! separate round trip and is not atomic with the mutation: a concurrent
//! delete can land in between. For updates the repository write itself
//! reports the missing row, which is surfaced as `NotFound`; for deletes the
//! second delete simply affects zero rows.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    error::{Result, ResultExt, TodoError},
    models::{NewTodo, Todo, TodoFilter, UpdateTodo},
    repository::TodoRepository,
    validation::TodoValidator,
};

/// Domain service orchestrating todo operations
pub struct TodoService<R> {
    repository: Arc<R>,
}

impl<R> Clone for TodoService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
        }
    }
}

impl<R: TodoRepository> TodoService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Get a clone of the repository Arc
    pub fn repository(&self) -> Arc<R> {
        self.repository.clone()
    }

    /// Validate input, build the entity and persist it.
    pub async fn create_todo(&self, new_todo: NewTodo) -> Result<Todo> {
        let due_date = TodoValidator::validate_new_todo(&new_todo)?;
        let todo = Todo::new(new_todo, due_date);

        self.repository
            .create(&todo)
            .await
            .with_context(|| "failed to save todo")?;

        info!(todo_id = %todo.id, priority = todo.priority, "Todo created");
        Ok(todo)
    }

    pub async fn get_todo_by_id(&self, id: &str) -> Result<Todo> {
        self.repository
            .get_by_id(id)
            .await
            .with_context(|| "failed to get todo")?
            .ok_or_else(|| TodoError::not_found_id(id))
    }

    pub async fn get_all_todos(&self, filter: TodoFilter) -> Result<Vec<Todo>> {
        self.repository
            .list(filter)
            .await
            .with_context(|| "failed to get todos")
    }

    /// Apply a partial update to an existing todo.
    ///
    /// Existence is checked before the payload is validated, so a missing
    /// id is reported as not found whatever the payload holds.
    ///
    /// # Returns
    /// * `Err(TodoError::NotFound)` - The todo does not exist, or vanished
    ///   between the existence check and the write
    /// * `Err(TodoError::Validation)` - Empty title or unparseable due date
    pub async fn update_todo(&self, id: &str, updates: UpdateTodo) -> Result<Todo> {
        self.ensure_exists(id).await?;

        TodoValidator::validate_update(&updates)?;

        let updated = self
            .repository
            .update(id, updates)
            .await
            .with_context(|| "failed to update todo")?
            .ok_or_else(|| TodoError::not_found_id(id))?;

        info!(todo_id = %id, completed = updated.completed, "Todo updated");
        Ok(updated)
    }

    pub async fn delete_todo(&self, id: &str) -> Result<()> {
        self.ensure_exists(id).await?;

        let rows = self
            .repository
            .delete(id)
            .await
            .with_context(|| "failed to delete todo")?;

        if rows == 0 {
            debug!(todo_id = %id, "Todo already removed by a concurrent request");
        } else {
            info!(todo_id = %id, "Todo deleted");
        }
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        self.repository.health_check().await
    }

    async fn ensure_exists(&self, id: &str) -> Result<()> {
        let existing = self
            .repository
            .get_by_id(id)
            .await
            .with_context(|| "failed to check if todo exists")?;

        match existing {
            Some(_) => Ok(()),
            None => Err(TodoError::not_found_id(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Repository whose every call fails with a persistence error
    struct UnreachableRepository;

    #[async_trait]
    impl TodoRepository for UnreachableRepository {
        async fn create(&self, _todo: &Todo) -> Result<()> {
            Err(TodoError::Persistence("connection refused".to_string()))
        }
        async fn get_by_id(&self, _id: &str) -> Result<Option<Todo>> {
            Err(TodoError::Persistence("connection refused".to_string()))
        }
        async fn list(&self, _filter: TodoFilter) -> Result<Vec<Todo>> {
            Err(TodoError::Persistence("connection refused".to_string()))
        }
        async fn update(&self, _id: &str, _updates: UpdateTodo) -> Result<Option<Todo>> {
            Err(TodoError::Persistence("connection refused".to_string()))
        }
        async fn delete(&self, _id: &str) -> Result<u64> {
            Err(TodoError::Persistence("connection refused".to_string()))
        }
        async fn health_check(&self) -> Result<()> {
            Err(TodoError::Persistence("connection refused".to_string()))
        }
    }

    fn service() -> TodoService<UnreachableRepository> {
        TodoService::new(Arc::new(UnreachableRepository))
    }

    #[tokio::test]
    async fn test_store_failures_keep_their_kind() {
        let service = service();

        let err = service.create_todo(NewTodo::new("x")).await.unwrap_err();
        assert_eq!(
            err,
            TodoError::Persistence("failed to save todo: connection refused".to_string())
        );

        let err = service.get_todo_by_id("x").await.unwrap_err();
        assert!(err.is_persistence());
        assert!(!err.is_not_found());

        let err = service.get_all_todos(TodoFilter::default()).await.unwrap_err();
        assert!(err.is_persistence());

        let err = service.update_todo("x", UpdateTodo::new()).await.unwrap_err();
        assert_eq!(
            err.message(),
            "failed to check if todo exists: connection refused"
        );

        assert!(service.delete_todo("x").await.unwrap_err().is_persistence());
        assert!(service.health_check().await.unwrap_err().is_persistence());
    }

    #[tokio::test]
    async fn test_create_validates_before_store() {
        let service = service();

        let err = service.create_todo(NewTodo::new("")).await.unwrap_err();
        assert_eq!(err, TodoError::Validation("title is required".to_string()));
    }

    #[tokio::test]
    async fn test_update_checks_store_before_validating() {
        let service = service();

        let updates = UpdateTodo {
            title: Some(String::new()),
            ..Default::default()
        };
        let err = service.update_todo("x", updates).await.unwrap_err();
        assert!(err.is_persistence());
        assert!(!err.is_validation());
    }
}
