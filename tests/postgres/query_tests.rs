//! Filtered and sorted task queries evaluated by `PostgreSQL`.

use super::helpers::{TestDatabase, archived_task, database, new_task};
use rstest::rstest;
use taskreflect::task::{
    domain::{Priority, SortDirection, SortKey, Task, TaskQuery, TaskSort},
    ports::TaskRepository,
};

fn store_all(database: &TestDatabase, tasks: &[Task]) {
    for task in tasks {
        database
            .block_on(database.repository.store(task))
            .expect("store should succeed");
    }
}

fn run(database: &TestDatabase, query: &TaskQuery) -> Vec<String> {
    database
        .block_on(database.repository.query(query))
        .expect("query should succeed")
        .iter()
        .map(|task| task.content().as_str().to_owned())
        .collect()
}

#[rstest]
fn active_query_filters_priority_in_creation_order(database: TestDatabase) {
    let clock = &database.clock;
    let tasks = [
        new_task(clock, "Buy milk", Priority::Medium),
        new_task(clock, "Call mum", Priority::High),
        new_task(clock, "Pay rent", Priority::Medium),
        archived_task(clock, "Already done", 4),
    ];
    store_all(&database, &tasks);

    assert_eq!(
        run(&database, &TaskQuery::active(None)),
        vec!["Buy milk", "Call mum", "Pay rent"]
    );
    assert_eq!(
        run(&database, &TaskQuery::active(Some(Priority::Medium))),
        vec!["Buy milk", "Pay rent"]
    );
    assert!(run(&database, &TaskQuery::active(Some(Priority::Low))).is_empty());
}

#[rstest]
fn archived_query_is_newest_first_by_default(database: TestDatabase) {
    let clock = &database.clock;
    let tasks = [
        archived_task(clock, "First done", 2),
        archived_task(clock, "Second done", 3),
        new_task(clock, "Still open", Priority::High),
    ];
    store_all(&database, &tasks);

    assert_eq!(
        run(&database, &TaskQuery::archived(None, TaskSort::newest_first())),
        vec!["Second done", "First done"]
    );
    assert_eq!(
        run(
            &database,
            &TaskQuery::archived(None, TaskSort::new(SortKey::Content, SortDirection::Descending))
        ),
        vec!["Second done", "First done"]
    );
}

#[rstest]
#[case::mixed_case("MILK", vec!["Oat milk", "Buttermilk"])]
#[case::padded_needle(" milk", vec!["Oat milk"])]
#[case::percent_is_literal("%", vec!["100% rye"])]
#[case::underscore_is_literal("_", vec!["snake_case notes"])]
#[case::backslash_is_literal("\\", vec![])]
#[case::blank("  ", vec!["snake_case notes", "100% rye", "Oat milk", "Buttermilk"])]
fn archived_search_matches_literal_substrings(
    database: TestDatabase,
    #[case] search: &str,
    #[case] expected: Vec<&str>,
) {
    let clock = &database.clock;
    let tasks = [
        archived_task(clock, "Buttermilk", 3),
        archived_task(clock, "Oat milk", 4),
        archived_task(clock, "100% rye", 5),
        archived_task(clock, "snake_case notes", 1),
    ];
    store_all(&database, &tasks);

    let query = TaskQuery::archived(Some(search), TaskSort::newest_first());

    assert_eq!(run(&database, &query), expected);
}
