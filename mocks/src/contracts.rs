//! Contract test helpers for validating trait implementations
//!
//! Provides standardized tests that any implementation of `TodoRepository`
//! should pass, ensuring consistent behavior across different implementations.
//! The suite tolerates pre-existing rows, so it can run against a shared store.

use chrono::{Duration, Utc};
use todo_core::{parse_timestamp, Todo, TodoFilter, TodoRepository};

use crate::{
    assert_all_completed, assert_only_updated_at_changed, assert_sorted_for_listing,
    assert_todo_equals, TodoBuilder, UpdateTodoBuilder, SAMPLE_DUE_DATE,
};

/// Test any TodoRepository implementation with comprehensive contract tests
///
/// This function runs a suite of tests that any TodoRepository implementation
/// should pass to be considered compliant with the expected contract.
pub async fn test_repository_contract<R: TodoRepository>(repo: &R) {
    test_create_contract(repo).await;
    test_get_contract(repo).await;
    test_update_contract(repo).await;
    test_due_date_contract(repo).await;
    test_list_contract(repo).await;
    test_delete_contract(repo).await;
    test_health_check_contract(repo).await;
}

/// Test todo creation contract
pub async fn test_create_contract<R: TodoRepository>(repo: &R) {
    let todo = TodoBuilder::new().with_title("CREATE-TEST").build();
    repo.create(&todo).await.expect("Create should succeed");

    let stored = repo
        .get_by_id(&todo.id)
        .await
        .expect("Get should succeed")
        .expect("Created todo should be readable");
    assert_todo_equals(&stored, &todo);
    assert_eq!(stored.created_at, todo.created_at, "created_at should round-trip");

    // Same id twice is a store failure, never silently accepted
    let duplicate = repo.create(&todo).await;
    match duplicate {
        Err(e) => assert!(e.is_persistence(), "Expected persistence error, got: {e:?}"),
        Ok(()) => panic!("Should reject duplicate todo ids"),
    }
}

/// Test todo retrieval contract
pub async fn test_get_contract<R: TodoRepository>(repo: &R) {
    let missing = repo
        .get_by_id("00000000-0000-0000-0000-000000000000")
        .await
        .expect("Get of a missing id should not fail");
    assert!(missing.is_none(), "Missing todo should be None");

    let empty_description = TodoBuilder::new()
        .with_title("GET-TEST")
        .with_description("")
        .build();
    repo.create(&empty_description)
        .await
        .expect("Create should succeed");
    let stored = repo
        .get_by_id(&empty_description.id)
        .await
        .expect("Get should succeed")
        .expect("Todo should exist");
    assert_eq!(stored.description, "", "Empty description should read back empty");
}

/// Test partial update contract
pub async fn test_update_contract<R: TodoRepository>(repo: &R) {
    let todo = TodoBuilder::new()
        .with_title("UPDATE-TEST")
        .with_description("before")
        .with_priority(2)
        .with_created_at(Utc::now() - Duration::minutes(5))
        .build();
    repo.create(&todo).await.expect("Create should succeed");

    let updated = repo
        .update(&todo.id, UpdateTodoBuilder::new().with_completed(true).build())
        .await
        .expect("Update should succeed")
        .expect("Existing todo should be updated");
    assert!(updated.completed, "completed should be set");
    assert_eq!(updated.title, todo.title, "Omitted title must not change");
    assert_eq!(updated.description, "before", "Omitted description must not change");
    assert_eq!(updated.priority, 2, "Omitted priority must not change");
    assert_eq!(updated.created_at, todo.created_at, "created_at must not change");
    assert!(
        updated.updated_at > todo.updated_at,
        "updated_at should move forward"
    );

    let updated = repo
        .update(
            &todo.id,
            UpdateTodoBuilder::new()
                .with_title("UPDATE-TEST renamed")
                .with_description("")
                .with_priority(-3)
                .with_completed(false)
                .build(),
        )
        .await
        .expect("Update should succeed")
        .expect("Existing todo should be updated");
    assert_eq!(updated.title, "UPDATE-TEST renamed");
    assert_eq!(updated.description, "", "Description can be set to empty");
    assert_eq!(updated.priority, -3);
    assert!(!updated.completed, "completed toggles back");

    // An update with no fields still counts as a mutation
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let touched = repo
        .update(&todo.id, UpdateTodoBuilder::new().build())
        .await
        .expect("Empty update should succeed")
        .expect("Existing todo should be updated");
    assert_only_updated_at_changed(&updated, &touched);

    let missing = repo
        .update(
            "00000000-0000-0000-0000-000000000000",
            UpdateTodoBuilder::new().with_title("ghost").build(),
        )
        .await
        .expect("Update of a missing id should not fail");
    assert!(missing.is_none(), "Updating a missing todo should return None");
}

/// Test due date set, keep and clear semantics
pub async fn test_due_date_contract<R: TodoRepository>(repo: &R) {
    let todo = TodoBuilder::new()
        .with_title("DUE-TEST")
        .with_due_date(SAMPLE_DUE_DATE)
        .build();
    repo.create(&todo).await.expect("Create should succeed");

    let expected = parse_timestamp(SAMPLE_DUE_DATE).expect("valid sample due date");
    let stored = repo
        .get_by_id(&todo.id)
        .await
        .expect("Get should succeed")
        .expect("Todo should exist");
    assert_eq!(stored.due_date, Some(expected), "Due date should round-trip");

    let kept = repo
        .update(&todo.id, UpdateTodoBuilder::new().with_priority(4).build())
        .await
        .expect("Update should succeed")
        .expect("Todo should exist");
    assert_eq!(kept.due_date, Some(expected), "Omitted due date must be kept");

    let moved = repo
        .update(
            &todo.id,
            UpdateTodoBuilder::new()
                .with_due_date("2024-02-01T08:30:00+02:00")
                .build(),
        )
        .await
        .expect("Update should succeed")
        .expect("Todo should exist");
    assert_eq!(
        moved.due_date,
        Some(parse_timestamp("2024-02-01T06:30:00Z").expect("valid timestamp")),
        "Offsets should be normalized to UTC"
    );

    let cleared = repo
        .update(&todo.id, UpdateTodoBuilder::new().clear_due_date().build())
        .await
        .expect("Update should succeed")
        .expect("Todo should exist");
    assert!(cleared.due_date.is_none(), "Empty due date should clear it");

    let invalid = repo
        .update(
            &todo.id,
            UpdateTodoBuilder::new().with_due_date("tomorrow").build(),
        )
        .await;
    match invalid {
        Err(e) => assert!(e.is_validation(), "Expected validation error, got: {e:?}"),
        Ok(_) => panic!("Unparseable due date should be rejected"),
    }
}

/// Test listing order and filter contract
pub async fn test_list_contract<R: TodoRepository>(repo: &R) {
    let base = Utc::now() - Duration::minutes(1);
    let a = TodoBuilder::new()
        .with_title("LIST-A")
        .with_priority(1)
        .completed(true)
        .with_created_at(base)
        .build();
    let b = TodoBuilder::new()
        .with_title("LIST-B")
        .with_priority(5)
        .completed(true)
        .with_created_at(base + Duration::seconds(1))
        .build();
    let c = TodoBuilder::new()
        .with_title("LIST-C")
        .with_priority(3)
        .with_created_at(base + Duration::seconds(2))
        .build();
    let d = TodoBuilder::new()
        .with_title("LIST-D")
        .with_priority(1)
        .completed(true)
        .with_created_at(base + Duration::seconds(3))
        .build();
    for todo in [&a, &b, &c, &d] {
        repo.create(todo).await.expect("Create should succeed");
    }

    let all = repo
        .list(TodoFilter::default())
        .await
        .expect("List should succeed");
    assert_sorted_for_listing(&all);
    for todo in [&a, &b, &c, &d] {
        assert!(
            all.iter().any(|t| t.id == todo.id),
            "Unfiltered listing should contain '{}'",
            todo.title
        );
    }

    let done = repo
        .list(TodoFilter::completed(true))
        .await
        .expect("Filtered list should succeed");
    assert_all_completed(&done, true);
    assert_sorted_for_listing(&done);
    let ours: Vec<&str> = done
        .iter()
        .filter(|t| t.title.starts_with("LIST-"))
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(ours, ["LIST-B", "LIST-D", "LIST-A"]);

    let open = repo
        .list(TodoFilter::completed(false))
        .await
        .expect("Filtered list should succeed");
    assert_all_completed(&open, false);
    assert!(open.iter().any(|t| t.id == c.id));
    assert!(!open.iter().any(|t| t.id == a.id));
}

/// Test delete contract
pub async fn test_delete_contract<R: TodoRepository>(repo: &R) {
    let todo: Todo = TodoBuilder::new().with_title("DELETE-TEST").build();
    repo.create(&todo).await.expect("Create should succeed");

    let rows = repo.delete(&todo.id).await.expect("Delete should succeed");
    assert_eq!(rows, 1, "Deleting an existing todo affects one row");

    let gone = repo.get_by_id(&todo.id).await.expect("Get should succeed");
    assert!(gone.is_none(), "Deleted todo should not be readable");

    let rows = repo
        .delete(&todo.id)
        .await
        .expect("Deleting a missing todo should not fail");
    assert_eq!(rows, 0, "Deleting a missing todo affects no rows");
}

/// Test health check contract
pub async fn test_health_check_contract<R: TodoRepository>(repo: &R) {
    repo.health_check()
        .await
        .expect("Health check should succeed on a working store");
}
