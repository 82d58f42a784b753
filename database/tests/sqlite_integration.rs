//! SQLite-specific integration tests

use std::time::Duration;

use database::{PoolSettings, SqliteTodoRepository};
use futures::future::join_all;
use mocks::{assert_titles, TodoBuilder, UpdateTodoBuilder, SAMPLE_DUE_DATE};
use tempfile::TempDir;
use todo_core::{parse_timestamp, TodoFilter, TodoRepository};

async fn in_memory() -> SqliteTodoRepository {
    let repo = SqliteTodoRepository::new(":memory:").await.unwrap();
    repo.migrate().await.unwrap();
    repo
}

#[tokio::test]
async fn test_full_lifecycle() {
    let repo = in_memory().await;
    let todo = TodoBuilder::new()
        .with_title("Write docs")
        .with_due_date(SAMPLE_DUE_DATE)
        .build();

    repo.create(&todo).await.unwrap();

    let fetched = repo.get_by_id(&todo.id).await.unwrap().unwrap();
    assert_eq!(fetched, todo);

    let updated = repo
        .update(&todo.id, UpdateTodoBuilder::new().with_completed(true).build())
        .await
        .unwrap()
        .unwrap();
    assert!(updated.completed);
    assert_eq!(
        updated.due_date,
        Some(parse_timestamp(SAMPLE_DUE_DATE).unwrap())
    );

    assert_eq!(repo.delete(&todo.id).await.unwrap(), 1);
    assert!(repo.get_by_id(&todo.id).await.unwrap().is_none());
    assert_eq!(repo.delete(&todo.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_completed_listing_orders_by_priority() {
    let repo = in_memory().await;

    let a = TodoBuilder::new().with_title("A").with_priority(1).completed(true).build();
    repo.create(&a).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    let b = TodoBuilder::new().with_title("B").with_priority(5).completed(true).build();
    repo.create(&b).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    let c = TodoBuilder::new().with_title("C").with_priority(3).build();
    repo.create(&c).await.unwrap();

    let done = repo.list(TodoFilter::completed(true)).await.unwrap();
    assert_titles(&done, &["B", "A"]);

    let open = repo.list(TodoFilter::completed(false)).await.unwrap();
    assert_titles(&open, &["C"]);

    let all = repo.list(TodoFilter::default()).await.unwrap();
    assert_titles(&all, &["B", "C", "A"]);
}

#[tokio::test]
async fn test_equal_priority_newest_first() {
    let repo = in_memory().await;

    let older = TodoBuilder::new().with_title("older").build();
    repo.create(&older).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2)).await;
    let newer = TodoBuilder::new().with_title("newer").build();
    repo.create(&newer).await.unwrap();

    let all = repo.list(TodoFilter::default()).await.unwrap();
    assert_titles(&all, &["newer", "older"]);
}

#[tokio::test]
async fn test_empty_listing_is_empty_vec() {
    let repo = in_memory().await;
    assert!(repo.list(TodoFilter::default()).await.unwrap().is_empty());
    assert!(repo.list(TodoFilter::completed(true)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("todo.db");
    let url = format!("sqlite://{}", db_path.display());

    let todo = TodoBuilder::new().with_title("persistent").build();
    {
        let repo = SqliteTodoRepository::new(&url).await.unwrap();
        repo.migrate().await.unwrap();
        repo.create(&todo).await.unwrap();
        repo.close().await;
    }

    let repo = SqliteTodoRepository::new(&url).await.unwrap();
    // Migrations are idempotent
    repo.migrate().await.unwrap();
    let fetched = repo.get_by_id(&todo.id).await.unwrap().unwrap();
    assert_eq!(fetched, todo);
    repo.close().await;
}

#[tokio::test]
async fn test_concurrent_creates_on_file_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("concurrent.db");
    let repo = SqliteTodoRepository::with_settings(
        db_path.to_str().unwrap(),
        PoolSettings {
            max_connections: 4,
            acquire_timeout: Duration::from_secs(10),
        },
    )
    .await
    .unwrap();
    repo.migrate().await.unwrap();

    let todos: Vec<_> = (0..20)
        .map(|i| TodoBuilder::new().with_title(format!("todo {i}")).build())
        .collect();

    let results = join_all(todos.iter().map(|todo| repo.create(todo))).await;
    assert!(results.iter().all(Result::is_ok));

    let all = repo.list(TodoFilter::default()).await.unwrap();
    assert_eq!(all.len(), 20);
    repo.close().await;
}

#[tokio::test]
async fn test_operations_after_close_are_persistence_errors() {
    let repo = in_memory().await;
    repo.close().await;

    let err = repo.list(TodoFilter::default()).await.unwrap_err();
    assert!(err.is_persistence());
    assert!(repo.health_check().await.is_err());
}
