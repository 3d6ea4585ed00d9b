//! Append-only activity records forming each task's audit trail.

use super::{ParseActivityKindError, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of field-level change captured by an activity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Task creation.
    Created,
    /// Workflow status change.
    StatusChanged,
    /// Priority change.
    PriorityChanged,
    /// Assignee change.
    AssigneeChanged,
    /// Due date change.
    DueDateChanged,
    /// Title change.
    TitleChanged,
    /// Description change.
    DescriptionChanged,
}

impl ActivityKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::StatusChanged => "status_changed",
            Self::PriorityChanged => "priority_changed",
            Self::AssigneeChanged => "assignee_changed",
            Self::DueDateChanged => "due_date_changed",
            Self::TitleChanged => "title_changed",
            Self::DescriptionChanged => "description_changed",
        }
    }
}

impl TryFrom<&str> for ActivityKind {
    type Error = ParseActivityKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "status_changed" => Ok(Self::StatusChanged),
            "priority_changed" => Ok(Self::PriorityChanged),
            "assignee_changed" => Ok(Self::AssigneeChanged),
            "due_date_changed" => Ok(Self::DueDateChanged),
            "title_changed" => Ok(Self::TitleChanged),
            "description_changed" => Ok(Self::DescriptionChanged),
            _ => Err(ParseActivityKindError(value.to_owned())),
        }
    }
}

/// One immutable field-level change to a task.
///
/// Records are append-only; ordered by timestamp they form the canonical
/// change history of the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    task_id: TaskId,
    kind: ActivityKind,
    old_value: Option<String>,
    new_value: Option<String>,
    actor: UserId,
    recorded_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Creates an activity record.
    #[must_use]
    pub const fn new(
        task_id: TaskId,
        kind: ActivityKind,
        old_value: Option<String>,
        new_value: Option<String>,
        actor: UserId,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            task_id,
            kind,
            old_value,
            new_value,
            actor,
            recorded_at,
        }
    }

    /// Returns the changed task's identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the change kind.
    #[must_use]
    pub const fn kind(&self) -> ActivityKind {
        self.kind
    }

    /// Returns the value before the change, if any.
    #[must_use]
    pub fn old_value(&self) -> Option<&str> {
        self.old_value.as_deref()
    }

    /// Returns the value after the change, if any.
    #[must_use]
    pub fn new_value(&self) -> Option<&str> {
        self.new_value.as_deref()
    }

    /// Returns the acting member.
    #[must_use]
    pub const fn actor(&self) -> UserId {
        self.actor
    }

    /// Returns the change timestamp.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
