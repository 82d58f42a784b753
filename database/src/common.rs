use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite};
use todo_core::{
    error::{Result, TodoError},
    models::{Todo, TodoFilter},
};

/// Column list shared by every statement that returns whole todos
pub const TODO_COLUMNS: &str =
    "id, title, description, completed, priority, due_date, created_at, updated_at";

/// Convert SQLite row to Todo model
pub fn row_to_todo(row: &SqliteRow) -> Result<Todo> {
    let description: Option<String> = row.try_get("description").map_err(sqlx_error_to_todo_error)?;
    let due_date: Option<DateTime<Utc>> =
        row.try_get("due_date").map_err(sqlx_error_to_todo_error)?;

    Ok(Todo {
        id: row.try_get("id").map_err(sqlx_error_to_todo_error)?,
        title: row.try_get("title").map_err(sqlx_error_to_todo_error)?,
        description: description.unwrap_or_default(),
        completed: row.try_get("completed").map_err(sqlx_error_to_todo_error)?,
        priority: row.try_get("priority").map_err(sqlx_error_to_todo_error)?,
        due_date,
        created_at: row.try_get("created_at").map_err(sqlx_error_to_todo_error)?,
        updated_at: row.try_get("updated_at").map_err(sqlx_error_to_todo_error)?,
    })
}

/// Convert SQLx error to TodoError
///
/// Every store failure is a persistence error; only the message differs.
pub fn sqlx_error_to_todo_error(err: sqlx::Error) -> TodoError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().unwrap_or_default();
            let message = db_err.message();

            // SQLITE_CONSTRAINT_PRIMARYKEY / SQLITE_CONSTRAINT_UNIQUE
            if code == "1555" || code == "2067" || message.contains("UNIQUE constraint failed") {
                TodoError::Persistence(format!("Duplicate todo id: {message}"))
            } else {
                TodoError::Persistence(format!("Database constraint error: {message}"))
            }
        }
        sqlx::Error::RowNotFound => {
            // Absence is handled with fetch_optional, reaching here is a bug
            TodoError::Persistence("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::PoolTimedOut => TodoError::Persistence("Connection pool timeout".to_string()),
        sqlx::Error::PoolClosed => TodoError::Persistence("Connection pool closed".to_string()),
        sqlx::Error::Io(io_err) => TodoError::Persistence(format!("Database I/O error: {io_err}")),
        sqlx::Error::ColumnDecode { index, source } => {
            TodoError::Persistence(format!("Failed to decode column {index}: {source}"))
        }
        _ => TodoError::Persistence(format!("Database operation failed: {err}")),
    }
}

/// Build the listing query for a filter, ordered by priority then recency
pub fn build_list_query(filter: &TodoFilter) -> QueryBuilder<'static, Sqlite> {
    let mut query_builder: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {TODO_COLUMNS} FROM todos"));

    if let Some(completed) = filter.completed {
        query_builder.push(" WHERE completed = ");
        query_builder.push_bind(completed);
    }

    query_builder.push(" ORDER BY priority DESC, created_at DESC");
    query_builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Execute;

    #[test]
    fn test_list_query_without_filter() {
        let mut builder = build_list_query(&TodoFilter::default());
        let query = builder.build();
        assert_eq!(
            query.sql(),
            "SELECT id, title, description, completed, priority, due_date, created_at, updated_at FROM todos ORDER BY priority DESC, created_at DESC"
        );
    }

    #[test]
    fn test_list_query_with_completed_filter() {
        let mut builder = build_list_query(&TodoFilter::completed(true));
        let query = builder.build();
        assert!(query.sql().contains(" WHERE completed = ? ORDER BY"));
    }

    #[test]
    fn test_error_mapping_is_always_persistence() {
        assert!(sqlx_error_to_todo_error(sqlx::Error::PoolTimedOut).is_persistence());
        assert!(sqlx_error_to_todo_error(sqlx::Error::RowNotFound).is_persistence());
        assert!(sqlx_error_to_todo_error(sqlx::Error::PoolClosed).is_persistence());
    }
}
