//! Query parameter objects evaluated by repository adapters.
//!
//! Filters and sort descriptors are plain data so every adapter evaluates
//! the same predicate, and so callers can hold a query and re-run it when
//! the repository reports a change.

use super::{Priority, Task};
use std::cmp::Ordering;

/// Completion-state predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompletionFilter {
    /// Only tasks that are not yet done.
    Active,
    /// Only completed, archived tasks.
    Completed,
    /// Any task.
    #[default]
    Any,
}

impl CompletionFilter {
    /// Returns whether a task with the given completion flag matches.
    #[must_use]
    pub const fn accepts(self, is_done: bool) -> bool {
        match self {
            Self::Active => !is_done,
            Self::Completed => is_done,
            Self::Any => true,
        }
    }
}

/// Conjunction of task predicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    completion: CompletionFilter,
    priority: Option<Priority>,
    content_contains: Option<String>,
}

impl TaskFilter {
    /// Creates a filter matching every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter by completion state.
    #[must_use]
    pub fn with_completion(mut self, completion: CompletionFilter) -> Self {
        self.completion = completion;
        self
    }

    /// Restricts the filter to one priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts the filter to tasks whose content contains `text`,
    /// ignoring case. Surrounding whitespace is part of the needle;
    /// whitespace-only text leaves the filter unrestricted.
    #[must_use]
    pub fn with_content_containing(mut self, text: &str) -> Self {
        self.content_contains = if text.trim().is_empty() {
            None
        } else {
            Some(text.to_lowercase())
        };
        self
    }

    /// Returns the completion predicate.
    #[must_use]
    pub const fn completion(&self) -> CompletionFilter {
        self.completion
    }

    /// Returns the priority predicate.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the lower-cased search text, if any.
    #[must_use]
    pub fn content_contains(&self) -> Option<&str> {
        self.content_contains.as_deref()
    }

    /// Returns whether the task satisfies every predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.completion.accepts(task.is_done())
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self.content_contains.as_deref().is_none_or(|needle| {
                task.content().as_str().to_lowercase().contains(needle)
            })
    }
}

/// Field used to order query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Creation time while active, completion time once done.
    RegisterDate,
    /// Creation time.
    CreatedAt,
    /// Content, compared case-insensitively.
    Content,
    /// Priority level.
    Priority,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// Single-key sort descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskSort {
    key: SortKey,
    direction: SortDirection,
}

impl TaskSort {
    /// Creates a sort descriptor.
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Insertion order: oldest created first.
    #[must_use]
    pub const fn insertion_order() -> Self {
        Self::new(SortKey::CreatedAt, SortDirection::Ascending)
    }

    /// Most recently registered first; the archive default.
    #[must_use]
    pub const fn newest_first() -> Self {
        Self::new(SortKey::RegisterDate, SortDirection::Descending)
    }

    /// Returns the sort key.
    #[must_use]
    pub const fn key(self) -> SortKey {
        self.key
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn direction(self) -> SortDirection {
        self.direction
    }

    /// Compares two tasks under this descriptor.
    #[must_use]
    pub fn compare(self, left: &Task, right: &Task) -> Ordering {
        let ordering = match self.key {
            SortKey::RegisterDate => left.register_date().cmp(&right.register_date()),
            SortKey::CreatedAt => left.created_at().cmp(&right.created_at()),
            SortKey::Content => left
                .content()
                .as_str()
                .to_lowercase()
                .cmp(&right.content().as_str().to_lowercase()),
            SortKey::Priority => left.priority().cmp(&right.priority()),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl Default for TaskSort {
    fn default() -> Self {
        Self::insertion_order()
    }
}

/// Filter plus sort descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    filter: TaskFilter,
    sort: TaskSort,
}

impl TaskQuery {
    /// Creates a query from its parts.
    #[must_use]
    pub const fn new(filter: TaskFilter, sort: TaskSort) -> Self {
        Self { filter, sort }
    }

    /// Active tasks, optionally of a single priority, in insertion order.
    #[must_use]
    pub fn active(priority: Option<Priority>) -> Self {
        let base = TaskFilter::new().with_completion(CompletionFilter::Active);
        let filter = match priority {
            Some(level) => base.with_priority(level),
            None => base,
        };
        Self::new(filter, TaskSort::insertion_order())
    }

    /// Completed tasks, optionally narrowed by a content search.
    #[must_use]
    pub fn archived(search_text: Option<&str>, sort: TaskSort) -> Self {
        let base = TaskFilter::new().with_completion(CompletionFilter::Completed);
        let filter = match search_text {
            Some(text) => base.with_content_containing(text),
            None => base,
        };
        Self::new(filter, sort)
    }

    /// Returns the filter.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Returns the sort descriptor.
    #[must_use]
    pub const fn sort(&self) -> TaskSort {
        self.sort
    }

    /// Returns whether the task satisfies the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.filter.matches(task)
    }

    /// Sorts tasks in place. The sort is stable, so ties keep the order in
    /// which the adapter supplied them.
    pub fn sort_tasks(&self, tasks: &mut [Task]) {
        let sort = self.sort;
        tasks.sort_by(|left, right| sort.compare(left, right));
    }

    /// Filters and sorts the supplied tasks.
    #[must_use]
    pub fn evaluate<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Vec<Task> {
        let mut selected: Vec<Task> = tasks
            .into_iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect();
        self.sort_tasks(&mut selected);
        selected
    }
}
