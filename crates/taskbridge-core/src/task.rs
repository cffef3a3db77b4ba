//! Task and task-list entities.
//!
//! These are the canonical shapes the reconciliation core operates on.
//! Adapter-specific representations (page-property bags, API resources)
//! are converted to and from these types at the source boundary and never
//! reach the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::changes::Entity;
use crate::types::{EntityId, TaskStatus};

/// A task list as seen by the sync core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    /// Stable external identifier, unique within a snapshot.
    pub id: EntityId,
    /// Display title.
    pub title: String,
    /// Link back to the list in the originating service, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

impl TaskList {
    /// Create a list with just an id and title.
    pub fn new(id: impl Into<EntityId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            self_link: None,
        }
    }
}

/// A task as seen by the sync core.
///
/// `task_list_id` must reference a [`TaskList`] present in the same
/// snapshot. The invariant may be violated transiently while a partial
/// sync is in flight; see `validation::check_references`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable external identifier, unique within a snapshot.
    pub id: EntityId,
    /// Display title.
    pub title: String,
    /// Link back to the task in the originating service, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Completion status.
    pub status: TaskStatus,
    /// Due date, if any. Only the calendar day is significant for change
    /// detection; see [`same_calendar_day`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Utc>>,
    /// Completion timestamp, if the task has been completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<DateTime<Utc>>,
    /// Id of the owning task list.
    pub task_list_id: EntityId,
}

impl Task {
    /// Create a pending task with the given id, title, and owning list.
    pub fn new(
        id: impl Into<EntityId>,
        title: impl Into<String>,
        task_list_id: impl Into<EntityId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            self_link: None,
            status: TaskStatus::NeedsAction,
            due: None,
            completed: None,
            task_list_id: task_list_id.into(),
        }
    }

    /// Builder-style due date.
    pub fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }

    /// Builder-style status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Compare two optional timestamps by calendar day only.
///
/// Two due values are equal when they fall on the same day; time of day is
/// ignored. The day is taken from the value's own date components, with no
/// timezone re-normalization. A present value against an absent one always
/// counts as different.
pub fn same_calendar_day(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.date_naive() == b.date_naive(),
        _ => false,
    }
}

impl Entity for TaskList {
    fn entity_id(&self) -> &EntityId {
        &self.id
    }

    /// A list has changed only when its title has.
    fn content_eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Entity for Task {
    fn entity_id(&self) -> &EntityId {
        &self.id
    }

    /// A task has changed when its title, status, or owning list differ,
    /// or when the due date falls on a different calendar day. The
    /// completion timestamp and self link do not participate.
    fn content_eq(&self, other: &Self) -> bool {
        self.title == other.title
            && self.status == other.status
            && self.task_list_id == other.task_list_id
            && same_calendar_day(self.due, other.due)
    }
}
