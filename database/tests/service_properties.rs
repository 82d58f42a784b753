//! `TodoService` running over SQLite, end to end below the HTTP layer

use std::sync::Arc;
use std::time::Duration;

use database::SqliteTodoRepository;
use mocks::{
    complete_only_update, create_new_todo, create_priority_scenario, scenario_completed,
    assert_titles, NewTodoBuilder, UpdateTodoBuilder,
};
use todo_core::{TodoFilter, TodoService};

async fn service() -> TodoService<SqliteTodoRepository> {
    let repo = SqliteTodoRepository::new(":memory:").await.unwrap();
    repo.migrate().await.unwrap();
    TodoService::new(Arc::new(repo))
}

#[tokio::test]
async fn test_created_todo_is_readable_and_listed() {
    let service = service().await;

    let created = service.create_todo(create_new_todo()).await.unwrap();
    let fetched = service.get_todo_by_id(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let all = service.get_all_todos(TodoFilter::default()).await.unwrap();
    assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn test_priority_scenario() {
    let service = service().await;

    for new_todo in create_priority_scenario() {
        let completed = scenario_completed(&new_todo.title);
        let todo = service.create_todo(new_todo).await.unwrap();
        if completed {
            service
                .update_todo(&todo.id, complete_only_update())
                .await
                .unwrap();
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let done = service
        .get_all_todos(TodoFilter::completed(true))
        .await
        .unwrap();
    assert_titles(&done, &["B", "A"]);
}

#[tokio::test]
async fn test_update_refreshes_updated_at_only() {
    let service = service().await;
    let created = service.create_todo(create_new_todo()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let updated = service
        .update_todo(&created.id, UpdateTodoBuilder::new().with_priority(7).build())
        .await
        .unwrap();

    assert_eq!(updated.priority, 7);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn test_validation_and_not_found() {
    let service = service().await;

    let err = service
        .create_todo(NewTodoBuilder::new().with_title(" ").build())
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(service
        .get_all_todos(TodoFilter::default())
        .await
        .unwrap()
        .is_empty());

    let err = service
        .update_todo("missing", complete_only_update())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = service.delete_todo("missing").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let service = service().await;
    let created = service.create_todo(create_new_todo()).await.unwrap();

    service.delete_todo(&created.id).await.unwrap();

    assert!(service
        .get_todo_by_id(&created.id)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_closed_store_surfaces_persistence_error() {
    let service = service().await;
    service.repository().close().await;

    let err = service.create_todo(create_new_todo()).await.unwrap_err();
    assert!(err.is_persistence());
    assert!(err.message().starts_with("failed to save todo"));
}
