//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskWorld, run_async};
use rstest_bdd_macros::when;
use taskreflect::task::services::UpdateTaskRequest;

/// Submits the pending create request and records the outcome.
///
/// # Errors
///
/// Returns an error when no request is pending.
pub fn create_pending_task(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let request = world
        .pending_request
        .clone()
        .ok_or_else(|| eyre::eyre!("missing pending request in scenario world"))?;
    let result = run_async(world.service.create(request));
    if let Ok(outcome) = &result {
        world.task_id = Some(outcome.task().id());
        world.last_reminder = outcome.reminder().cloned();
    }
    world.last_create_result = Some(result);
    Ok(())
}

/// Completes the scenario task, recording any failure.
///
/// # Errors
///
/// Returns an error when no task has been created.
pub fn complete_current_task(
    world: &mut TaskWorld,
    rating: i64,
    reflection: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let result = run_async(world.service.complete(id, rating, reflection));
    if let Some(outcome) = world.record(result) {
        world.last_reminder = outcome.reminder().cloned();
    }
    Ok(())
}

/// Deletes the scenario task, recording any failure.
///
/// # Errors
///
/// Returns an error when no task has been created.
pub fn delete_current_task(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let result = run_async(world.service.delete(id));
    if let Some(status) = world.record(result) {
        world.last_reminder = Some(status);
    }
    Ok(())
}

#[when("the task is created")]
fn create_task(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    create_pending_task(world)
}

#[when("the reminder is switched off")]
fn switch_reminder_off(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let id = world.task_id()?;
    let result = run_async(
        world
            .service
            .edit(id, UpdateTaskRequest::new().with_reminder_enabled(false)),
    );
    if let Some(outcome) = world.record(result) {
        world.last_reminder = outcome.reminder().cloned();
    }
    Ok(())
}

#[when(r#"the task is completed with {rating:i64} stars and reflection "{reflection}""#)]
fn complete_task(world: &mut TaskWorld, rating: i64, reflection: String) -> Result<(), eyre::Report> {
    complete_current_task(world, rating, reflection)
}

#[when("the task is deleted")]
fn delete_task(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    delete_current_task(world)
}
