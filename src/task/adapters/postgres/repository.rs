//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::todo_tasks,
};
use crate::task::{
    domain::{
        Completion, CompletionFilter, PersistedTaskData, Priority, Rating, ReminderSettings,
        ReminderTime, Task, TaskContent, TaskId, TaskQuery,
    },
    ports::{
        TaskChange, TaskChangeFeed, TaskChangeReceiver, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::PgTextExpressionMethods;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// Change notifications cover writes made through this repository handle
/// and its clones.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
    changes: TaskChangeFeed,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub fn new(pool: TaskPgPool) -> Self {
        Self {
            pool,
            changes: TaskChangeFeed::default(),
        }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(todo_tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await?;
        self.changes.publish(TaskChange::Stored(task_id));
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_row(task)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(todo_tasks::table.filter(todo_tasks::id.eq(row.id)))
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            ensure_affected(affected, task_id)
        })
        .await?;
        self.changes.publish(TaskChange::Updated(task_id));
        Ok(())
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected =
                diesel::delete(todo_tasks::table.filter(todo_tasks::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            ensure_affected(affected, id)
        })
        .await?;
        self.changes.publish(TaskChange::Removed(id));
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = todo_tasks::table
                .filter(todo_tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn query(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let task_query = query.clone();
        self.run_blocking(move |connection| {
            let mut statement = todo_tasks::table
                .select(TaskRow::as_select())
                .order((todo_tasks::created_at.asc(), todo_tasks::id.asc()))
                .into_boxed();

            let filter = task_query.filter();
            match filter.completion() {
                CompletionFilter::Active => {
                    statement = statement.filter(todo_tasks::is_done.eq(false));
                }
                CompletionFilter::Completed => {
                    statement = statement.filter(todo_tasks::is_done.eq(true));
                }
                CompletionFilter::Any => {}
            }
            if let Some(priority) = filter.priority() {
                statement = statement.filter(todo_tasks::priority.eq(priority_to_column(priority)?));
            }
            if let Some(needle) = filter.content_contains() {
                statement = statement.filter(todo_tasks::content.ilike(like_pattern(needle)));
            }

            let rows = statement
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let mut tasks = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TaskRepositoryResult<Vec<_>>>()?;
            // Stable sort: ties keep creation order.
            task_query.sort_tasks(&mut tasks);
            Ok(tasks)
        })
        .await
    }

    fn subscribe(&self) -> TaskChangeReceiver {
        self.changes.subscribe()
    }
}

/// Row-level inconsistency detected while mapping persisted data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskRowError {
    /// A completed row lacks its rating, reflection, or completion time.
    #[error("task {0} is marked done without a complete rating and reflection")]
    IncompleteCompletion(uuid::Uuid),

    /// A numeric column does not fit the domain range.
    #[error("task {id} column {column} holds out-of-range value {value}")]
    OutOfRange {
        /// Task identifier.
        id: uuid::Uuid,
        /// Column name.
        column: &'static str,
        /// Stored value.
        value: i64,
    },
}

fn ensure_affected(affected: usize, id: TaskId) -> TaskRepositoryResult<()> {
    if affected == 0 {
        return Err(TaskRepositoryError::NotFound(id));
    }
    Ok(())
}

fn priority_to_column(priority: Priority) -> TaskRepositoryResult<i16> {
    i16::try_from(priority.value()).map_err(TaskRepositoryError::persistence)
}

/// Builds a case-insensitive `ILIKE` pattern matching `needle` literally.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn to_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let reminder = task.reminder();
    let completion = task.completion();
    let small = |value: i64| i16::try_from(value).map_err(TaskRepositoryError::persistence);

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        content: task.content().as_str().to_owned(),
        goal: task.goal().to_owned(),
        priority: priority_to_column(task.priority())?,
        is_done: task.is_done(),
        notification_enabled: reminder.is_enabled(),
        notification_hour: small(i64::from(reminder.time().hour()))?,
        notification_minute: small(i64::from(reminder.time().minute()))?,
        rating: completion.map(|done| i16::from(done.rating().value())),
        reflection: completion.map(|done| done.reflection().to_owned()),
        completed_at: completion.map(Completion::completed_at),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        content,
        goal,
        priority,
        is_done,
        notification_enabled,
        notification_hour,
        notification_minute,
        rating,
        reflection,
        completed_at,
        created_at,
        updated_at,
    } = row;

    let out_of_range = |column: &'static str, value: i16| {
        TaskRepositoryError::persistence(TaskRowError::OutOfRange {
            id,
            column,
            value: i64::from(value),
        })
    };
    let hour = u32::try_from(notification_hour)
        .map_err(|_| out_of_range("notification_hour", notification_hour))?;
    let minute = u32::try_from(notification_minute)
        .map_err(|_| out_of_range("notification_minute", notification_minute))?;
    let time = ReminderTime::new(hour, minute).map_err(TaskRepositoryError::persistence)?;
    let reminder = if notification_enabled {
        ReminderSettings::enabled_at(time)
    } else {
        ReminderSettings::disabled_at(time)
    };

    let completion = if is_done {
        let (Some(stars), Some(note), Some(done_at)) = (rating, reflection, completed_at) else {
            return Err(TaskRepositoryError::persistence(
                TaskRowError::IncompleteCompletion(id),
            ));
        };
        let parsed_rating =
            Rating::new(i64::from(stars)).map_err(TaskRepositoryError::persistence)?;
        Some(Completion::new(parsed_rating, note, done_at))
    } else {
        None
    };

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        content: TaskContent::new(content).map_err(TaskRepositoryError::persistence)?,
        goal,
        priority: Priority::try_from(i64::from(priority))
            .map_err(TaskRepositoryError::persistence)?,
        reminder,
        completion,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
