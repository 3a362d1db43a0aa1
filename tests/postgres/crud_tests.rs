//! Store, update, find, and remove round-trips through `PostgreSQL`.

use super::helpers::{TestDatabase, archived_task, database, new_task};
use rstest::rstest;
use taskreflect::task::{
    domain::{Priority, Rating, TaskContent, TaskEdit, TaskId},
    ports::{TaskChange, TaskRepository, TaskRepositoryError},
};

#[rstest]
fn store_and_find_round_trips_active_task(database: TestDatabase) {
    let task = new_task(&database.clock, "Water the plants", Priority::High);

    database
        .block_on(database.repository.store(&task))
        .expect("store should succeed");
    let found = database
        .block_on(database.repository.find_by_id(task.id()))
        .expect("find should succeed")
        .expect("task should exist");

    assert_eq!(found, task);
}

#[rstest]
fn find_missing_task_returns_none(database: TestDatabase) {
    let found = database
        .block_on(database.repository.find_by_id(TaskId::new()))
        .expect("find should succeed");

    assert!(found.is_none());
}

#[rstest]
fn update_persists_edit_and_completion(database: TestDatabase) {
    let mut task = new_task(&database.clock, "Water the plants", Priority::High);
    database
        .block_on(database.repository.store(&task))
        .expect("store should succeed");

    let edit = TaskEdit {
        goal: Some("Only the ferns".to_owned()),
        reminder_enabled: Some(false),
        ..TaskEdit::default()
    };
    task.apply_edit(edit, &database.clock)
        .expect("edit succeeds");
    task.complete(
        Rating::new(5).expect("valid rating"),
        "Done before noon",
        &database.clock,
    )
    .expect("completion succeeds");
    database
        .block_on(database.repository.update(&task))
        .expect("update should succeed");

    let found = database
        .block_on(database.repository.find_by_id(task.id()))
        .expect("find should succeed")
        .expect("task should exist");
    assert_eq!(found, task);
    assert_eq!(found.reflection(), Some("Done before noon"));
    assert!(!found.reminder().is_enabled());
}

#[rstest]
fn store_rejects_duplicate_id(database: TestDatabase) {
    let task = new_task(&database.clock, "Water the plants", Priority::High);
    database
        .block_on(database.repository.store(&task))
        .expect("first store should succeed");

    let result = database.block_on(database.repository.store(&task));

    assert!(
        matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
        "expected DuplicateTask, got: {result:?}"
    );
}

#[rstest]
fn update_of_missing_task_is_not_found(database: TestDatabase) {
    let task = new_task(&database.clock, "Never stored", Priority::Low);

    let result = database.block_on(database.repository.update(&task));

    assert!(
        matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()),
        "expected NotFound, got: {result:?}"
    );
}

#[rstest]
fn remove_twice_reports_not_found(database: TestDatabase) {
    let task = archived_task(&database.clock, "Read a chapter", 3);
    database
        .block_on(database.repository.store(&task))
        .expect("store should succeed");

    database
        .block_on(database.repository.remove(task.id()))
        .expect("first remove should succeed");
    let second = database.block_on(database.repository.remove(task.id()));

    assert!(
        matches!(second, Err(TaskRepositoryError::NotFound(id)) if id == task.id()),
        "expected NotFound, got: {second:?}"
    );
    let found = database
        .block_on(database.repository.find_by_id(task.id()))
        .expect("find should succeed");
    assert!(found.is_none());
}

#[rstest]
fn content_at_the_length_limit_is_stored(database: TestDatabase) {
    let title = "ü".repeat(TaskContent::MAX_CHARS);
    let task = new_task(&database.clock, &title, Priority::Medium);

    database
        .block_on(database.repository.store(&task))
        .expect("a title at the limit fits the column");
    let found = database
        .block_on(database.repository.find_by_id(task.id()))
        .expect("find should succeed")
        .expect("task should exist");

    assert_eq!(found.content().as_str(), title);
}

#[rstest]
fn writes_publish_changes(database: TestDatabase) {
    let mut changes = database.repository.subscribe();
    let task = new_task(&database.clock, "Water the plants", Priority::High);

    database
        .block_on(database.repository.store(&task))
        .expect("store should succeed");
    database
        .block_on(database.repository.remove(task.id()))
        .expect("remove should succeed");

    let first = database
        .block_on(changes.recv())
        .expect("store change is delivered");
    let second = database
        .block_on(changes.recv())
        .expect("remove change is delivered");
    assert_eq!(first, TaskChange::Stored(task.id()));
    assert_eq!(second, TaskChange::Removed(task.id()));
}
