use crate::common::{build_list_query, row_to_todo, sqlx_error_to_todo_error, TODO_COLUMNS};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    QueryBuilder, Sqlite, SqlitePool,
};
use std::{str::FromStr, time::Duration};
use todo_core::{
    error::{Result, TodoError},
    models::{DueDateUpdate, Todo, TodoFilter, UpdateTodo},
    repository::TodoRepository,
};

/// Connection pool settings for [`SqliteTodoRepository`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    /// Maximum number of pooled connections (file databases only)
    pub max_connections: u32,
    /// How long to wait for a free connection
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 25,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// SQLite implementation of the TodoRepository trait
///
/// Owns the single connection pool for the process. The pool is created once,
/// shared by cloning the repository (clones share the pool), and closed with
/// [`SqliteTodoRepository::close`].
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    /// Create a new SQLite repository with default pool settings
    ///
    /// # Arguments
    /// * `database_url` - A file path, a `sqlite://` URL, or `:memory:`
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::SqliteTodoRepository;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let repo = SqliteTodoRepository::new(":memory:").await?;
    ///
    /// // File-based database
    /// let repo = SqliteTodoRepository::new("sqlite://data/todo.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_settings(database_url, PoolSettings::default()).await
    }

    /// Create a new SQLite repository with explicit pool settings
    pub async fn with_settings(database_url: &str, settings: PoolSettings) -> Result<Self> {
        if settings.max_connections == 0 {
            return Err(TodoError::Configuration(
                "max_connections must be greater than 0".to_string(),
            ));
        }

        let pool = if is_in_memory(database_url) {
            // A private in-memory database lives as long as its connection,
            // so keep exactly one connection open for the pool's lifetime.
            let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(sqlx_error_to_todo_error)?
                .foreign_keys(true);

            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .acquire_timeout(settings.acquire_timeout)
                .connect_with(connect_options)
                .await
                .map_err(sqlx_error_to_todo_error)?
        } else {
            let path = database_url
                .strip_prefix("sqlite://")
                .or_else(|| database_url.strip_prefix("sqlite:"))
                .unwrap_or(database_url);

            let connect_options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(5))
                .foreign_keys(true);

            SqlitePoolOptions::new()
                .max_connections(settings.max_connections)
                .acquire_timeout(settings.acquire_timeout)
                .connect_with(connect_options)
                .await
                .map_err(sqlx_error_to_todo_error)?
        };

        tracing::info!(
            database_url = %database_url,
            max_connections = settings.max_connections,
            "SQLite connection pool created"
        );

        Ok(Self { pool })
    }

    /// Run database migrations
    ///
    /// Creates the `todos` table and its indexes. Must run once at startup,
    /// before any repository operation.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| TodoError::Persistence(format!("Migration failed: {e}")))?;

        tracing::info!("Database migrations completed successfully");
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("SQLite connection pool closed");
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// This method is primarily intended for testing scenarios where
    /// direct SQL execution is needed.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(database_url: &str) -> bool {
    matches!(database_url, ":memory:" | "sqlite::memory:" | "sqlite://:memory:")
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn create(&self, todo: &Todo) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO todos (id, title, description, completed, priority, due_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&todo.id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .bind(todo.priority)
        .bind(todo.due_date)
        .bind(todo.created_at)
        .bind(todo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(sqlx_error_to_todo_error)?;

        tracing::debug!(todo_id = %todo.id, "Inserted todo row");
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Todo>> {
        let result = sqlx::query(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        match result {
            Some(row) => Ok(Some(row_to_todo(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>> {
        let mut query_builder = build_list_query(&filter);

        let rows = query_builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        tracing::debug!(completed = ?filter.completed, count = rows.len(), "Listed todos");

        rows.iter().map(row_to_todo).collect()
    }

    async fn update(&self, id: &str, updates: UpdateTodo) -> Result<Option<Todo>> {
        // Reject a bad due date before touching the store
        let due_date = updates.due_date_update()?;

        // Single UPDATE ... RETURNING: the existence check and the write are
        // one statement, so a concurrent delete yields None, never a stale row.
        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE todos SET ");
        {
            let mut assignments = query_builder.separated(", ");

            if let Some(title) = updates.title {
                assignments.push("title = ").push_bind_unseparated(title);
            }
            if let Some(description) = updates.description {
                assignments.push("description = ").push_bind_unseparated(description);
            }
            if let Some(completed) = updates.completed {
                assignments.push("completed = ").push_bind_unseparated(completed);
            }
            if let Some(priority) = updates.priority {
                assignments.push("priority = ").push_bind_unseparated(priority);
            }
            match due_date {
                DueDateUpdate::Keep => {}
                DueDateUpdate::Clear => {
                    assignments.push("due_date = NULL");
                }
                DueDateUpdate::Set(value) => {
                    assignments.push("due_date = ").push_bind_unseparated(value);
                }
            }
            assignments.push("updated_at = ").push_bind_unseparated(Utc::now());
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id);
        query_builder.push(" RETURNING ");
        query_builder.push(TODO_COLUMNS);

        let result = query_builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        match result {
            Some(row) => Ok(Some(row_to_todo(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        let rows_affected = result.rows_affected();
        tracing::debug!(todo_id = %id, rows_affected, "Deleted todo row");
        Ok(rows_affected)
    }

    async fn health_check(&self) -> Result<()> {
        // Simple query to verify database connectivity
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(sqlx_error_to_todo_error)?;

        Ok(())
    }
}
