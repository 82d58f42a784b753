//! Mock implementation of TodoRepository trait
//!
//! Provides a thread-safe mock repository with:
//! - Error injection capabilities
//! - Call tracking for verification
//! - Simulation of a delete racing an update

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use todo_core::{Result, Todo, TodoError, TodoFilter, TodoRepository, UpdateTodo};

/// Mock implementation of TodoRepository for testing
///
/// Mirrors the SQLite repository's observable behavior: absence is `Ok(None)`
/// or zero rows, listings are ordered by priority then recency, and a bad
/// due date on update is a validation error.
#[derive(Clone)]
pub struct MockTodoRepository {
    todos: Arc<Mutex<HashMap<String, Todo>>>,
    error_injection: Arc<Mutex<Option<TodoError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
    vanish_on_update: Arc<AtomicBool>,
}

impl Default for MockTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTodoRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::with_todos(Vec::new())
    }

    /// Create mock repository with pre-populated todos
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let todo_map = todos.into_iter().map(|t| (t.id.clone(), t)).collect();

        Self {
            todos: Arc::new(Mutex::new(todo_map)),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
            vanish_on_update: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: TodoError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
    }

    /// Make the next `update` behave as if a concurrent request deleted the
    /// row just before the write.
    pub fn simulate_concurrent_delete(&self) {
        self.vanish_on_update.store(true, Ordering::SeqCst);
    }

    /// Number of stored todos
    pub fn len(&self) -> usize {
        self.todos.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.lock().is_empty()
    }

    /// Snapshot of a stored todo, bypassing call tracking
    pub fn stored(&self, id: &str) -> Option<Todo> {
        self.todos.lock().get(id).cloned()
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.call_history.lock().clear();
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Assert method was never called
    pub fn assert_not_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            !history.iter().any(|call| call.starts_with(method)),
            "Method '{}' was called. Call history: {:?}",
            method,
            *history
        );
    }

    /// Check if an error should be injected, consuming it if so
    fn check_error_injection(&self) -> Result<()> {
        let mut error_opt = self.error_injection.lock();
        if let Some(error) = error_opt.take() {
            return Err(error);
        }
        Ok(())
    }

    /// Record method call with parameters in history
    fn record_call_with_params(&self, method: &str, params: &str) {
        self.call_history.lock().push(format!("{method}({params})"));
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn create(&self, todo: &Todo) -> Result<()> {
        self.record_call_with_params("create", &format!("id={}", todo.id));
        self.check_error_injection()?;

        let mut todos = self.todos.lock();
        if todos.contains_key(&todo.id) {
            return Err(TodoError::Persistence(format!(
                "Duplicate todo id: {}",
                todo.id
            )));
        }
        todos.insert(todo.id.clone(), todo.clone());

        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Todo>> {
        self.record_call_with_params("get_by_id", &format!("id={id}"));
        self.check_error_injection()?;

        Ok(self.todos.lock().get(id).cloned())
    }

    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>> {
        self.record_call_with_params("list", &format!("completed={:?}", filter.completed));
        self.check_error_injection()?;

        let mut todos: Vec<Todo> = self
            .todos
            .lock()
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();

        todos.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        Ok(todos)
    }

    async fn update(&self, id: &str, updates: UpdateTodo) -> Result<Option<Todo>> {
        self.record_call_with_params("update", &format!("id={id}"));
        self.check_error_injection()?;

        let due_date = updates.due_date_update()?;

        let mut todos = self.todos.lock();
        if self.vanish_on_update.swap(false, Ordering::SeqCst) {
            todos.remove(id);
        }

        let Some(todo) = todos.get_mut(id) else {
            return Ok(None);
        };

        if let Some(title) = updates.title {
            todo.title = title;
        }
        if let Some(description) = updates.description {
            todo.description = description;
        }
        if let Some(completed) = updates.completed {
            todo.completed = completed;
        }
        if let Some(priority) = updates.priority {
            todo.priority = priority;
        }
        todo.due_date = due_date.apply(todo.due_date);
        todo.updated_at = Utc::now();

        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        self.record_call_with_params("delete", &format!("id={id}"));
        self.check_error_injection()?;

        Ok(self.todos.lock().remove(id).map_or(0, |_| 1))
    }

    async fn health_check(&self) -> Result<()> {
        self.record_call_with_params("health_check", "");
        self.check_error_injection()
    }
}
