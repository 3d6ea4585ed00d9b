//! Repository port for workboard persistence, lookup, and edge maintenance.

use crate::workboard::domain::{
    ActivityRecord, Comment, CommentMention, ListId, TagId, Task, TaskId, TaskList, TaskMention,
    UserId, WatcherEdge, WorkspaceId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workboard repository operations.
pub type WorkboardRepositoryResult<T> = Result<T, WorkboardRepositoryError>;

/// Persistence contract consumed by the mutation engine, mention dispatcher,
/// and relevance feed builder.
///
/// Each call is atomic: a task and its activity records persist together or
/// not at all, and every edge insert is insert-if-absent, safe under
/// concurrent duplicate calls.
#[async_trait]
pub trait WorkboardRepository: Send + Sync {
    /// Stores a new task together with its creation activity record.
    ///
    /// # Errors
    ///
    /// Returns [`WorkboardRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn create_task(
        &self,
        task: &Task,
        activity: &ActivityRecord,
    ) -> WorkboardRepositoryResult<()>;

    /// Persists a mutated task and appends its activity records in one write.
    ///
    /// # Errors
    ///
    /// Returns [`WorkboardRepositoryError::TaskNotFound`] when the task does
    /// not exist.
    async fn update_task(
        &self,
        task: &Task,
        activities: &[ActivityRecord],
    ) -> WorkboardRepositoryResult<()>;

    /// Deletes a task, cascading over its subtask subtree, comments, watcher
    /// and mention edges, and activity history.
    ///
    /// # Errors
    ///
    /// Returns [`WorkboardRepositoryError::TaskNotFound`] when the task is
    /// absent from the given workspace.
    async fn delete_task(
        &self,
        workspace: WorkspaceId,
        task_id: TaskId,
    ) -> WorkboardRepositoryResult<()>;

    /// Finds a task by identifier within the given workspace.
    ///
    /// Returns `None` when the task does not exist or belongs to another
    /// workspace.
    async fn find_task(
        &self,
        workspace: WorkspaceId,
        task_id: TaskId,
    ) -> WorkboardRepositoryResult<Option<Task>>;

    /// Returns all tasks in the given workspace.
    async fn tasks_in_workspace(
        &self,
        workspace: WorkspaceId,
    ) -> WorkboardRepositoryResult<Vec<Task>>;

    /// Returns the highest order index currently used in the given list, or
    /// `None` when the list holds no tasks.
    async fn max_order_index(
        &self,
        workspace: WorkspaceId,
        list_id: ListId,
    ) -> WorkboardRepositoryResult<Option<i64>>;

    /// Finds a task list by identifier within the given workspace.
    async fn find_list(
        &self,
        workspace: WorkspaceId,
        list_id: ListId,
    ) -> WorkboardRepositoryResult<Option<TaskList>>;

    /// Filters the requested tag identifiers down to those existing in the
    /// given workspace, preserving request order and dropping duplicates.
    async fn resolve_tags(
        &self,
        workspace: WorkspaceId,
        requested: &[TagId],
    ) -> WorkboardRepositoryResult<Vec<TagId>>;

    /// Stores a new comment.
    async fn add_comment(&self, comment: &Comment) -> WorkboardRepositoryResult<()>;

    /// Returns a task's comments ordered by creation time.
    async fn comments_for_task(&self, task_id: TaskId) -> WorkboardRepositoryResult<Vec<Comment>>;

    /// Returns a task's activity records ordered by timestamp.
    async fn activities_for_task(
        &self,
        task_id: TaskId,
    ) -> WorkboardRepositoryResult<Vec<ActivityRecord>>;

    /// Inserts a watcher edge if absent; idempotent.
    async fn ensure_watcher(&self, edge: WatcherEdge) -> WorkboardRepositoryResult<()>;

    /// Returns the users watching a task.
    async fn watchers(&self, task_id: TaskId) -> WorkboardRepositoryResult<Vec<UserId>>;

    /// Inserts a task-mention edge if absent; idempotent.
    async fn add_task_mention(&self, mention: &TaskMention) -> WorkboardRepositoryResult<()>;

    /// Inserts a comment-mention edge if absent; idempotent.
    async fn add_comment_mention(&self, mention: &CommentMention)
    -> WorkboardRepositoryResult<()>;

    /// Returns the users mentioned directly in a task's own content.
    async fn task_mention_users(&self, task_id: TaskId) -> WorkboardRepositoryResult<Vec<UserId>>;

    /// Returns the users mentioned in any comment on the given task.
    async fn comment_mention_users(
        &self,
        task_id: TaskId,
    ) -> WorkboardRepositoryResult<Vec<UserId>>;
}

/// Errors returned by workboard repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkboardRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found in the given workspace.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkboardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
