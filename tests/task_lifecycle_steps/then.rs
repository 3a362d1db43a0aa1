//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskWorld, run_async};
use chrono::{TimeDelta, Timelike, Utc};
use rstest_bdd_macros::then;
use taskreflect::task::{
    domain::{Priority, ReminderId, TaskSort},
    services::{ReminderStatus, TaskErrorKind},
};

fn expect_error_kind(world: &TaskWorld, expected: TaskErrorKind) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the last operation to fail"))?;
    if err.kind() != expected {
        return Err(eyre::eyre!("expected {expected:?} error, got {err}"));
    }
    Ok(())
}

#[then(r#"the active tasks with priority {priority:i64} are exactly "{content}""#)]
fn active_tasks_are_exactly(
    world: &TaskWorld,
    priority: i64,
    content: String,
) -> Result<(), eyre::Report> {
    let level = Priority::try_from(priority)?;
    let active = run_async(world.service.query_active(Some(level)))?;
    let titles: Vec<&str> = active.iter().map(|task| task.content().as_str()).collect();
    if titles != [content.as_str()] {
        return Err(eyre::eyre!("expected only {content:?}, found {titles:?}"));
    }
    if active.iter().any(|task| task.is_done()) {
        return Err(eyre::eyre!("active query returned a completed task"));
    }
    Ok(())
}

#[then("a reminder is pending for the next {hour:u32}:{minute:u32}")]
fn reminder_pending_for_next(world: &TaskWorld, hour: u32, minute: u32) -> Result<(), eyre::Report> {
    let id = ReminderId::for_task(world.task_id()?);
    let request = world
        .notifications
        .pending_for(&id)?
        .ok_or_else(|| eyre::eyre!("no reminder pending for {id}"))?;
    let now = Utc::now();
    if request.fire_at.hour() != hour || request.fire_at.minute() != minute {
        return Err(eyre::eyre!("reminder fires at {}", request.fire_at));
    }
    if request.fire_at <= now || request.fire_at - now > TimeDelta::days(1) {
        return Err(eyre::eyre!(
            "reminder at {} is not the next occurrence after {now}",
            request.fire_at
        ));
    }
    if !matches!(world.last_reminder, Some(ReminderStatus::Scheduled { .. })) {
        return Err(eyre::eyre!(
            "expected a scheduled status, got {:?}",
            world.last_reminder
        ));
    }
    Ok(())
}

#[then("no reminder is pending")]
fn no_reminder_pending(world: &TaskWorld) -> Result<(), eyre::Report> {
    let pending = world.notifications.pending()?;
    if !pending.is_empty() {
        return Err(eyre::eyre!("expected no pending reminder, found {pending:?}"));
    }
    Ok(())
}

#[then("creation fails with a validation error")]
fn creation_fails_validation(world: &TaskWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result in scenario world"))?;
    match result {
        Err(err) if err.kind() == TaskErrorKind::Validation => Ok(()),
        other => Err(eyre::eyre!("expected a validation error, got {other:?}")),
    }
}

#[then("no task is stored")]
fn no_task_stored(world: &TaskWorld) -> Result<(), eyre::Report> {
    if !world.repository.is_empty()? {
        return Err(eyre::eyre!("expected the repository to be empty"));
    }
    Ok(())
}

#[then("the last operation fails with an invalid state error")]
fn last_operation_invalid_state(world: &TaskWorld) -> Result<(), eyre::Report> {
    expect_error_kind(world, TaskErrorKind::InvalidState)
}

#[then("the last operation fails with a not found error")]
fn last_operation_not_found(world: &TaskWorld) -> Result<(), eyre::Report> {
    expect_error_kind(world, TaskErrorKind::NotFound)
}

#[then(r#"the archive holds "{content}" rated {rating:u8} with reflection "{reflection}""#)]
fn archive_holds(
    world: &TaskWorld,
    content: String,
    rating: u8,
    reflection: String,
) -> Result<(), eyre::Report> {
    let archived = run_async(
        world
            .service
            .query_archived(Some(content.as_str()), TaskSort::newest_first()),
    )?;
    let [task] = archived.as_slice() else {
        return Err(eyre::eyre!(
            "expected one archived task, found {}",
            archived.len()
        ));
    };
    if task.rating().map(|stars| stars.value()) != Some(rating) {
        return Err(eyre::eyre!("unexpected rating {:?}", task.rating()));
    }
    if task.reflection() != Some(reflection.as_str()) {
        return Err(eyre::eyre!("unexpected reflection {:?}", task.reflection()));
    }
    Ok(())
}

#[then("the reminder status reports denied permission")]
fn reminder_permission_denied(world: &TaskWorld) -> Result<(), eyre::Report> {
    if world.last_reminder != Some(ReminderStatus::PermissionDenied) {
        return Err(eyre::eyre!(
            "expected permission denied, got {:?}",
            world.last_reminder
        ));
    }
    Ok(())
}
