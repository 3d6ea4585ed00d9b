//! Task aggregate root, status and priority enums, and field patching.

use super::{
    ActivityKind, ActivityRecord, ListId, ParsePriorityError, ParseStatusError, TagId,
    TaskDomainError, TaskId, UserId, WorkspaceId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task workflow status.
///
/// The workflow runs `Todo` → `InProgress` → `InReview` → `Done`, with
/// `Blocked` reachable from, and returning to, any non-`Done` status. Every
/// transition is permitted and merely recorded as an activity; permission
/// checks gate the actor, not the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    Todo,
    /// Work is underway.
    InProgress,
    /// Work is awaiting review.
    InReview,
    /// Work is complete.
    Done,
    /// Work cannot proceed.
    Blocked,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "in_review" => Ok(Self::InReview),
            "done" => Ok(Self::Done),
            "blocked" => Ok(Self::Blocked),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// No priority assigned.
    None,
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
    /// Urgent priority.
    Urgent,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }

    /// Returns true for the priority levels that contribute urgency when
    /// ranking a personal feed.
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::High | Self::Urgent)
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "none" => Ok(Self::None),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Parameter object for constructing a new task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Owning list.
    pub list_id: ListId,
    /// Parent task when this task is a subtask.
    pub parent_id: Option<TaskId>,
    /// Task title (required, non-blank).
    pub title: String,
    /// Task description.
    pub description: Option<String>,
    /// Secondary description.
    pub sub_description: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Free-text status overlay preferred for display when present.
    pub custom_status: Option<String>,
    /// Priority level.
    pub priority: Priority,
    /// Assigned workspace member, if any.
    pub assignee: Option<UserId>,
    /// Creating workspace member.
    pub creator: UserId,
    /// Due date in UTC, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Position within the owning list (monotonic per list).
    pub order_index: i64,
    /// Attached workspace tags.
    pub tags: Vec<TagId>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    workspace_id: WorkspaceId,
    list_id: ListId,
    parent_id: Option<TaskId>,
    title: String,
    description: Option<String>,
    sub_description: Option<String>,
    status: TaskStatus,
    custom_status: Option<String>,
    priority: Priority,
    assignee: Option<UserId>,
    creator: UserId,
    due_date: Option<DateTime<Utc>>,
    order_index: i64,
    tags: Vec<TagId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank after
    /// trimming.
    pub fn new(data: NewTaskData, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = data.title.trim().to_owned();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            workspace_id: data.workspace_id,
            list_id: data.list_id,
            parent_id: data.parent_id,
            title,
            description: data.description,
            sub_description: data.sub_description,
            status: data.status,
            custom_status: data.custom_status,
            priority: data.priority,
            assignee: data.assignee,
            creator: data.creator,
            due_date: data.due_date,
            order_index: data.order_index,
            tags: data.tags,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning workspace identifier.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the owning list identifier.
    #[must_use]
    pub const fn list_id(&self) -> ListId {
        self.list_id
    }

    /// Returns the parent task identifier when this task is a subtask.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the secondary description, if any.
    #[must_use]
    pub fn sub_description(&self) -> Option<&str> {
        self.sub_description.as_deref()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the free-text status overlay, if any.
    #[must_use]
    pub fn custom_status(&self) -> Option<&str> {
        self.custom_status.as_deref()
    }

    /// Returns the status label display logic should prefer: the free-text
    /// overlay when present, otherwise the canonical workflow status.
    #[must_use]
    pub fn display_status(&self) -> &str {
        self.custom_status
            .as_deref()
            .unwrap_or_else(|| self.status.as_str())
    }

    /// Returns the priority level.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the creating member.
    #[must_use]
    pub const fn creator(&self) -> UserId {
        self.creator
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the position within the owning list.
    #[must_use]
    pub const fn order_index(&self) -> i64 {
        self.order_index
    }

    /// Returns the attached tag identifiers.
    #[must_use]
    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the given user may mutate this task: only the current
    /// assignee or the creator.
    #[must_use]
    pub fn can_be_mutated_by(&self, user: UserId) -> bool {
        self.creator == user || self.assignee == Some(user)
    }

    /// Applies a field patch, returning one typed activity record per mutable
    /// field whose new value differs from the current value.
    ///
    /// Tag, custom-status, and sub-description changes are applied without an
    /// activity record; the activity kind enum is closed over the audited
    /// fields. The `updated_at` timestamp moves only when at least one field
    /// actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the patch carries a blank
    /// title; the task is left unchanged.
    pub fn apply_patch(
        &mut self,
        patch: &TaskPatch,
        actor: UserId,
        clock: &impl Clock,
    ) -> Result<Vec<ActivityRecord>, TaskDomainError> {
        if let Some(title) = patch.title.as_deref()
            && title.trim().is_empty()
        {
            return Err(TaskDomainError::EmptyTitle);
        }

        let now = clock.utc();
        let mut activities = Vec::new();
        let mut changed = false;

        if let Some(title) = patch.title.as_deref() {
            let trimmed = title.trim();
            if trimmed != self.title {
                activities.push(ActivityRecord::new(
                    self.id,
                    ActivityKind::TitleChanged,
                    Some(self.title.clone()),
                    Some(trimmed.to_owned()),
                    actor,
                    now,
                ));
                self.title = trimmed.to_owned();
                changed = true;
            }
        }

        if let Some(description) = patch.description.as_deref()
            && self.description.as_deref() != Some(description)
        {
            activities.push(ActivityRecord::new(
                self.id,
                ActivityKind::DescriptionChanged,
                self.description.clone(),
                Some(description.to_owned()),
                actor,
                now,
            ));
            self.description = Some(description.to_owned());
            changed = true;
        }

        if let Some(status) = patch.status
            && status != self.status
        {
            activities.push(ActivityRecord::new(
                self.id,
                ActivityKind::StatusChanged,
                Some(self.status.as_str().to_owned()),
                Some(status.as_str().to_owned()),
                actor,
                now,
            ));
            self.status = status;
            changed = true;
        }

        if let Some(priority) = patch.priority
            && priority != self.priority
        {
            activities.push(ActivityRecord::new(
                self.id,
                ActivityKind::PriorityChanged,
                Some(self.priority.as_str().to_owned()),
                Some(priority.as_str().to_owned()),
                actor,
                now,
            ));
            self.priority = priority;
            changed = true;
        }

        if let Some(assignee) = patch.assignee
            && assignee != self.assignee
        {
            activities.push(ActivityRecord::new(
                self.id,
                ActivityKind::AssigneeChanged,
                self.assignee.map(|user| user.to_string()),
                assignee.map(|user| user.to_string()),
                actor,
                now,
            ));
            self.assignee = assignee;
            changed = true;
        }

        if let Some(due_date) = patch.due_date
            && due_date != self.due_date
        {
            activities.push(ActivityRecord::new(
                self.id,
                ActivityKind::DueDateChanged,
                self.due_date.map(|date| date.to_rfc3339()),
                due_date.map(|date| date.to_rfc3339()),
                actor,
                now,
            ));
            self.due_date = due_date;
            changed = true;
        }

        if let Some(sub_description) = patch.sub_description.as_deref()
            && self.sub_description.as_deref() != Some(sub_description)
        {
            self.sub_description = Some(sub_description.to_owned());
            changed = true;
        }

        if let Some(custom_status) = patch.custom_status.as_deref()
            && self.custom_status.as_deref() != Some(custom_status)
        {
            self.custom_status = Some(custom_status.to_owned());
            changed = true;
        }

        if let Some(tags) = patch.tags.as_deref()
            && tags != self.tags
        {
            self.tags = tags.to_vec();
            changed = true;
        }

        if changed {
            self.updated_at = now;
        }
        Ok(activities)
    }
}

/// Partial field update for a task, built incrementally.
///
/// Absent fields are left untouched; `assignee` and `due_date` distinguish
/// "leave alone" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    sub_description: Option<String>,
    status: Option<TaskStatus>,
    custom_status: Option<String>,
    priority: Option<Priority>,
    assignee: Option<Option<UserId>>,
    due_date: Option<Option<DateTime<Utc>>>,
    tags: Option<Vec<TagId>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new secondary description.
    #[must_use]
    pub fn with_sub_description(mut self, sub_description: impl Into<String>) -> Self {
        self.sub_description = Some(sub_description.into());
        self
    }

    /// Sets a new workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a new free-text status overlay.
    #[must_use]
    pub fn with_custom_status(mut self, custom_status: impl Into<String>) -> Self {
        self.custom_status = Some(custom_status.into());
        self
    }

    /// Sets a new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Assigns the task to the given member.
    #[must_use]
    pub const fn assign(mut self, assignee: UserId) -> Self {
        self.assignee = Some(Some(assignee));
        self
    }

    /// Clears the assignee.
    #[must_use]
    pub const fn unassign(mut self) -> Self {
        self.assignee = Some(None);
        self
    }

    /// Sets a new due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Clears the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Replaces the full tag set.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagId>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Returns the requested assignee change: `None` leaves the assignee
    /// alone, `Some(None)` clears it, `Some(Some(user))` reassigns.
    #[must_use]
    pub const fn assignee_change(&self) -> Option<Option<UserId>> {
        self.assignee
    }

    /// Returns the requested replacement tag set, if any.
    #[must_use]
    pub fn requested_tags(&self) -> Option<&[TagId]> {
        self.tags.as_deref()
    }
}
