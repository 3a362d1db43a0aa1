//! In-memory integration tests for live query subscriptions.

use super::helpers::{TestContext, context};
use rstest::rstest;
use taskreflect::task::{
    domain::{Priority, TaskQuery},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn priority_view_follows_edits(context: TestContext) {
    let mut high = context.service.watch(TaskQuery::active(Some(Priority::High)));
    let created = context
        .service
        .create(CreateTaskRequest::new("Renew passport", 2))
        .await
        .expect("task creation should succeed")
        .into_task();
    let after_create = high
        .next()
        .await
        .expect("feed should be open")
        .expect("query should succeed");
    assert!(after_create.is_empty());

    context
        .service
        .edit(created.id(), UpdateTaskRequest::new().with_priority(3))
        .await
        .expect("edit should succeed");
    let after_edit = high
        .next()
        .await
        .expect("feed should be open")
        .expect("query should succeed");

    assert_eq!(after_edit.len(), 1);
    assert!(after_edit.iter().all(|task| task.id() == created.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deletion_is_observed(context: TestContext) {
    let created = context
        .service
        .create(CreateTaskRequest::new("Buy milk", 2))
        .await
        .expect("task creation should succeed")
        .into_task();
    let mut active = context.service.watch(TaskQuery::active(None));
    assert_eq!(
        active.current().await.expect("query should succeed").len(),
        1
    );

    context
        .service
        .delete(created.id())
        .await
        .expect("delete should succeed");
    let after_delete = active
        .next()
        .await
        .expect("feed should be open")
        .expect("query should succeed");

    assert!(after_delete.is_empty());
    assert_eq!(active.query(), &TaskQuery::active(None));
}
