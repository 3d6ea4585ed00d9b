//! Task mutation engine: permission-gated create, update, delete, and
//! comment operations, each leaving an immutable audit trail.

use crate::workboard::{
    domain::{
        ActivityKind, ActivityRecord, Comment, ListId, NewTaskData, Priority, TagId, Task,
        TaskDomainError, TaskId, TaskPatch, TaskStatus, UserId, WorkspaceId,
    },
    ports::{
        MembershipError, MembershipOracle, NotificationSink, WorkboardRepository,
        WorkboardRepositoryError,
    },
    services::mentions::{MentionDispatchError, MentionDispatcher},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    list_id: ListId,
    title: String,
    description: Option<String>,
    sub_description: Option<String>,
    status: Option<TaskStatus>,
    custom_status: Option<String>,
    priority: Option<Priority>,
    assignee: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
    tags: Vec<TagId>,
    parent_id: Option<TaskId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(list_id: ListId, title: impl Into<String>) -> Self {
        Self {
            list_id,
            title: title.into(),
            description: None,
            sub_description: None,
            status: None,
            custom_status: None,
            priority: None,
            assignee: None,
            due_date: None,
            tags: Vec::new(),
            parent_id: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the secondary description.
    #[must_use]
    pub fn with_sub_description(mut self, sub_description: impl Into<String>) -> Self {
        self.sub_description = Some(sub_description.into());
        self
    }

    /// Sets the initial workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets an explicit status label, suppressing the list default.
    #[must_use]
    pub fn with_custom_status(mut self, custom_status: impl Into<String>) -> Self {
        self.custom_status = Some(custom_status.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Attaches workspace tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = TagId>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Makes the new task a subtask of the given parent.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// Service-level errors for task mutation operations.
#[derive(Debug, Error)]
pub enum TaskMutationError {
    /// The task was not found in the given workspace.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    /// The target list was not found in the given workspace.
    #[error("list {0} not found")]
    ListNotFound(ListId),

    /// The actor is neither the current assignee nor the creator.
    #[error("user {user} may not modify task {task}")]
    PermissionDenied {
        /// Gated task.
        task: TaskId,
        /// Rejected actor.
        user: UserId,
    },

    /// A referenced user is not a member of the workspace.
    #[error("user {user} is not a member of workspace {workspace}")]
    InvalidReference {
        /// Workspace boundary.
        workspace: WorkspaceId,
        /// Out-of-workspace user.
        user: UserId,
    },

    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkboardRepositoryError),

    /// Membership lookup failed.
    #[error(transparent)]
    Membership(#[from] MembershipError),

    /// Mention dispatch failed after the mutation committed.
    #[error(transparent)]
    Dispatch(#[from] MentionDispatchError),
}

/// Result type for task mutation operations.
pub type TaskMutationResult<T> = Result<T, TaskMutationError>;

/// Task mutation orchestration service.
#[derive(Clone)]
pub struct TaskMutationService<R, M, N, C>
where
    R: WorkboardRepository,
    M: MembershipOracle,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    membership: Arc<M>,
    mentions: MentionDispatcher<R, M, N, C>,
    clock: Arc<C>,
}

impl<R, M, N, C> TaskMutationService<R, M, N, C>
where
    R: WorkboardRepository,
    M: MembershipOracle,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a new task mutation service.
    #[must_use]
    pub fn new(repository: Arc<R>, membership: Arc<M>, sink: Arc<N>, clock: Arc<C>) -> Self {
        let mentions = MentionDispatcher::new(
            Arc::clone(&repository),
            Arc::clone(&membership),
            sink,
            Arc::clone(&clock),
        );
        Self {
            repository,
            membership,
            mentions,
            clock,
        }
    }

    /// Returns the mention dispatcher sharing this service's collaborators.
    #[must_use]
    pub const fn mentions(&self) -> &MentionDispatcher<R, M, N, C> {
        &self.mentions
    }

    /// Creates a task.
    ///
    /// The actor becomes a watcher, as does an assignee differing from the
    /// actor; exactly one `Created` activity is emitted, and mentions in the
    /// initial description are dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::ListNotFound`] for an unknown list,
    /// [`TaskMutationError::InvalidReference`] when the actor or assignee is
    /// not a workspace member, and [`TaskMutationError::Validation`] for a
    /// blank title.
    pub async fn create(
        &self,
        workspace: WorkspaceId,
        actor: UserId,
        request: CreateTaskRequest,
    ) -> TaskMutationResult<Task> {
        self.require_member(workspace, actor).await?;
        let list = self
            .repository
            .find_list(workspace, request.list_id)
            .await?
            .ok_or(TaskMutationError::ListNotFound(request.list_id))?;
        if let Some(assignee) = request.assignee {
            self.require_member(workspace, assignee).await?;
        }

        let tags = self.repository.resolve_tags(workspace, &request.tags).await?;
        let order_index = self
            .repository
            .max_order_index(workspace, request.list_id)
            .await?
            .map_or(1, |max| max + 1);
        let custom_status = request
            .custom_status
            .or_else(|| list.default_status_label().map(ToOwned::to_owned));

        let task = Task::new(
            NewTaskData {
                workspace_id: workspace,
                list_id: request.list_id,
                parent_id: request.parent_id,
                title: request.title,
                description: request.description,
                sub_description: request.sub_description,
                status: request.status.unwrap_or(TaskStatus::Todo),
                custom_status,
                priority: request.priority.unwrap_or(Priority::None),
                assignee: request.assignee,
                creator: actor,
                due_date: request.due_date,
                order_index,
                tags,
            },
            &*self.clock,
        )?;
        let created = ActivityRecord::new(
            task.id(),
            ActivityKind::Created,
            None,
            Some(task.title().to_owned()),
            actor,
            task.created_at(),
        );
        self.repository.create_task(&task, &created).await?;

        self.mentions.ensure_watching(task.id(), actor).await?;
        if let Some(assignee) = task.assignee()
            && assignee != actor
        {
            self.mentions.ensure_watching(task.id(), assignee).await?;
        }
        if let Some(description) = task.description() {
            self.mentions
                .dispatch_task_mentions(workspace, &task, actor, description)
                .await?;
        }
        Ok(task)
    }

    /// Applies a partial update to a task.
    ///
    /// Only the current assignee or the creator may mutate; every differing
    /// mutable field appends exactly one typed activity. Unmatched tag ids in
    /// a tag replace are dropped silently. A changed description re-runs
    /// mention dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::TaskNotFound`],
    /// [`TaskMutationError::PermissionDenied`],
    /// [`TaskMutationError::InvalidReference`] for a non-member assignee, or
    /// [`TaskMutationError::Validation`] for a blank title. All failures
    /// leave the task unchanged with zero appended activities.
    pub async fn update(
        &self,
        workspace: WorkspaceId,
        actor: UserId,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> TaskMutationResult<Task> {
        let mut task = self.require_mutable_task(workspace, actor, task_id).await?;
        if let Some(Some(assignee)) = patch.assignee_change() {
            self.require_member(workspace, assignee).await?;
        }
        let applied = match patch.requested_tags() {
            Some(requested) => {
                let resolved = self.repository.resolve_tags(workspace, requested).await?;
                patch.with_tags(resolved)
            }
            None => patch,
        };

        let activities = task.apply_patch(&applied, actor, &*self.clock)?;
        self.repository.update_task(&task, &activities).await?;

        let assignee_changed = activities
            .iter()
            .any(|activity| activity.kind() == ActivityKind::AssigneeChanged);
        if assignee_changed && let Some(assignee) = task.assignee() {
            self.mentions.ensure_watching(task.id(), assignee).await?;
        }
        let description_changed = activities
            .iter()
            .any(|activity| activity.kind() == ActivityKind::DescriptionChanged);
        if description_changed && let Some(description) = task.description() {
            self.mentions
                .dispatch_task_mentions(workspace, &task, actor, description)
                .await?;
        }
        Ok(task)
    }

    /// Deletes a task, cascading over subtasks, comments, and activity
    /// history.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::TaskNotFound`] or
    /// [`TaskMutationError::PermissionDenied`]; the gate matches `update`.
    pub async fn delete(
        &self,
        workspace: WorkspaceId,
        actor: UserId,
        task_id: TaskId,
    ) -> TaskMutationResult<()> {
        self.require_mutable_task(workspace, actor, task_id).await?;
        self.repository.delete_task(workspace, task_id).await?;
        Ok(())
    }

    /// Adds a comment to a task and dispatches the mentions in its content.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::TaskNotFound`] for an unknown task or
    /// [`TaskMutationError::InvalidReference`] when the author is not a
    /// workspace member.
    pub async fn add_comment(
        &self,
        workspace: WorkspaceId,
        actor: UserId,
        task_id: TaskId,
        content: impl Into<String> + Send,
    ) -> TaskMutationResult<Comment> {
        self.require_member(workspace, actor).await?;
        let task = self
            .repository
            .find_task(workspace, task_id)
            .await?
            .ok_or(TaskMutationError::TaskNotFound(task_id))?;

        let comment = Comment::new(task_id, actor, content, &*self.clock);
        self.repository.add_comment(&comment).await?;
        self.mentions
            .dispatch_comment_mentions(workspace, &task, &comment)
            .await?;
        Ok(comment)
    }

    /// Returns a task's canonical change history ordered by timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::TaskNotFound`] when the task is absent
    /// from the given workspace.
    pub async fn activity_log(
        &self,
        workspace: WorkspaceId,
        task_id: TaskId,
    ) -> TaskMutationResult<Vec<ActivityRecord>> {
        self.repository
            .find_task(workspace, task_id)
            .await?
            .ok_or(TaskMutationError::TaskNotFound(task_id))?;
        Ok(self.repository.activities_for_task(task_id).await?)
    }

    /// Fetches a task and enforces the mutation permission gate.
    async fn require_mutable_task(
        &self,
        workspace: WorkspaceId,
        actor: UserId,
        task_id: TaskId,
    ) -> TaskMutationResult<Task> {
        let task = self
            .repository
            .find_task(workspace, task_id)
            .await?
            .ok_or(TaskMutationError::TaskNotFound(task_id))?;
        if !task.can_be_mutated_by(actor) {
            return Err(TaskMutationError::PermissionDenied {
                task: task_id,
                user: actor,
            });
        }
        Ok(task)
    }

    async fn require_member(
        &self,
        workspace: WorkspaceId,
        user: UserId,
    ) -> TaskMutationResult<()> {
        if self.membership.is_member(workspace, user).await? {
            Ok(())
        } else {
            Err(TaskMutationError::InvalidReference { workspace, user })
        }
    }
}
