//! Custom assertion helpers for testing
//!
//! Provides specialized assertions for:
//! - Todo equality with clear error messages
//! - Listing order and filter checks
//! - Update side effects

use todo_core::Todo;

/// Assert todos are equal ignoring timestamps
pub fn assert_todo_equals(actual: &Todo, expected: &Todo) {
    assert_eq!(actual.id, expected.id, "Todo IDs don't match");
    assert_eq!(actual.title, expected.title, "Todo titles don't match");
    assert_eq!(
        actual.description, expected.description,
        "Todo descriptions don't match"
    );
    assert_eq!(
        actual.completed, expected.completed,
        "Todo completion flags don't match"
    );
    assert_eq!(actual.priority, expected.priority, "Todo priorities don't match");
    assert_eq!(actual.due_date, expected.due_date, "Todo due dates don't match");
}

/// Assert a listing is ordered by priority (highest first), ties broken by
/// creation time (newest first)
pub fn assert_sorted_for_listing(todos: &[Todo]) {
    for window in todos.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        assert!(
            a.priority > b.priority
                || (a.priority == b.priority && a.created_at >= b.created_at),
            "Todos are not in listing order. '{}' (priority {}, created {}) comes before '{}' (priority {}, created {})",
            a.title,
            a.priority,
            a.created_at,
            b.title,
            b.priority,
            b.created_at
        );
    }
}

/// Assert every todo in the listing has the given completion flag
pub fn assert_all_completed(todos: &[Todo], completed: bool) {
    for todo in todos {
        assert_eq!(
            todo.completed, completed,
            "Todo '{}' has completed={} but the listing was filtered on completed={}",
            todo.title, todo.completed, completed
        );
    }
}

/// Assert listing titles in order
pub fn assert_titles(todos: &[Todo], expected: &[&str]) {
    let titles: Vec<&str> = todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, expected, "Unexpected listing titles");
}

/// Assert an update that carried no field changes left the data intact and
/// only moved `updated_at` forward
pub fn assert_only_updated_at_changed(before: &Todo, after: &Todo) {
    assert_todo_equals(after, before);
    assert_eq!(
        after.created_at, before.created_at,
        "created_at must never change"
    );
    assert!(
        after.updated_at > before.updated_at,
        "updated_at did not move forward: {} -> {}",
        before.updated_at,
        after.updated_at
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TodoBuilder;
    use chrono::{Duration, Utc};

    #[test]
    fn test_sorted_for_listing_accepts_tie_break_by_recency() {
        let now = Utc::now();
        let todos = vec![
            TodoBuilder::new().with_priority(5).with_created_at(now).build(),
            TodoBuilder::new()
                .with_priority(5)
                .with_created_at(now - Duration::seconds(1))
                .build(),
            TodoBuilder::new().with_priority(1).with_created_at(now).build(),
        ];
        assert_sorted_for_listing(&todos);
    }

    #[test]
    #[should_panic(expected = "not in listing order")]
    fn test_sorted_for_listing_rejects_low_priority_first() {
        let todos = vec![
            TodoBuilder::new().with_priority(1).build(),
            TodoBuilder::new().with_priority(5).build(),
        ];
        assert_sorted_for_listing(&todos);
    }

    #[test]
    #[should_panic(expected = "updated_at did not move forward")]
    fn test_only_updated_at_changed_requires_strict_increase() {
        let todo = TodoBuilder::new().build();
        assert_only_updated_at_changed(&todo, &todo.clone());
    }

    #[test]
    fn test_only_updated_at_changed_accepts_later_timestamp() {
        let before = TodoBuilder::new().build();
        let mut after = before.clone();
        after.updated_at = before.updated_at + Duration::milliseconds(1);
        assert_only_updated_at_changed(&before, &after);
    }
}
