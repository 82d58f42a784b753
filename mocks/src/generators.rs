//! Random test data generators using the fake crate
//!
//! Provides realistic random data including:
//! - Todo titles and descriptions
//! - Priorities and due dates
//! - Property-based testing strategies

use chrono::{Duration, TimeZone, Utc};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;
use todo_core::{format_timestamp, NewTodo, Todo, TodoFilter, UpdateTodo};

/// Generate a realistic todo title
pub fn generate_title() -> String {
    Sentence(2..6).fake()
}

/// Generate a realistic todo description
pub fn generate_description() -> String {
    Paragraph(1..3).fake()
}

/// Generate a priority in the range people actually use
pub fn generate_priority() -> i32 {
    rand::thread_rng().gen_range(0..=10)
}

/// Generate an RFC 3339 due date within the next 90 days
pub fn generate_due_date() -> String {
    let minutes: i64 = (0i64..90 * 24 * 60).fake();
    format_timestamp(&(Utc::now() + Duration::minutes(minutes)))
}

/// Generate a random creation input
pub fn generate_new_todo() -> NewTodo {
    let due_date = rand::thread_rng().gen_bool(0.5).then(generate_due_date);
    NewTodo {
        title: generate_title(),
        description: generate_description(),
        priority: generate_priority(),
        due_date,
    }
}

/// Generate a random todo with realistic data
pub fn generate_random_todo() -> Todo {
    let mut todo = Todo::new(
        NewTodo {
            title: generate_title(),
            description: generate_description(),
            priority: generate_priority(),
            due_date: None,
        },
        None,
    );
    todo.completed = rand::thread_rng().gen_bool(0.5);
    todo
}

/// Proptest strategy for non-empty titles
pub fn title_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 .,!?-]{0,60}"
}

/// Proptest strategy for RFC 3339 due dates in UTC, whole seconds
pub fn due_date_strategy() -> impl Strategy<Value = String> {
    // 2000-01-01 .. 2100-01-01
    (946_684_800i64..4_102_444_800i64).prop_map(|secs| {
        let dt = Utc
            .timestamp_opt(secs, 0)
            .single()
            .unwrap_or_else(Utc::now);
        format_timestamp(&dt)
    })
}

/// Proptest strategy for valid creation inputs
pub fn new_todo_strategy() -> impl Strategy<Value = NewTodo> {
    (
        title_strategy(),
        "[A-Za-z0-9 .,!?]{0,200}",
        -100i32..100,
        proptest::option::of(due_date_strategy()),
    )
        .prop_map(|(title, description, priority, due_date)| NewTodo {
            title,
            description,
            priority,
            due_date,
        })
}

/// Proptest strategy for partial updates (titles, when present, are valid)
pub fn update_todo_strategy() -> impl Strategy<Value = UpdateTodo> {
    (
        proptest::option::of(title_strategy()),
        proptest::option::of("[A-Za-z0-9 ]{0,50}"),
        proptest::option::of(any::<bool>()),
        proptest::option::of(-100i32..100),
        proptest::option::of(prop_oneof![Just(String::new()), due_date_strategy()]),
    )
        .prop_map(
            |(title, description, completed, priority, due_date)| UpdateTodo {
                title,
                description,
                completed,
                priority,
                due_date,
            },
        )
}

/// Proptest strategy for listing filters
pub fn todo_filter_strategy() -> impl Strategy<Value = TodoFilter> {
    proptest::option::of(any::<bool>()).prop_map(|completed| TodoFilter { completed })
}
