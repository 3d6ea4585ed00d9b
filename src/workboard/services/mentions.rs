//! Watcher registry and mention fan-out.
//!
//! Bridges mention extraction to the watcher/mention edge sets and the
//! external notification sink. Edge persistence is part of the mutation
//! guarantee; sink delivery is best-effort and never fails the caller.

use crate::workboard::{
    domain::{
        ChannelId, Comment, CommentMention, Task, TaskId, TaskMention, UserId, WatcherEdge,
        WorkspaceId, extract_mentions,
    },
    ports::{
        MembershipError, MembershipOracle, MentionContext, MentionNotification, NotificationSink,
        WorkboardRepository, WorkboardRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by mention dispatch.
///
/// Sink failures are deliberately absent: they are logged and swallowed.
#[derive(Debug, Error)]
pub enum MentionDispatchError {
    /// Edge persistence failed.
    #[error(transparent)]
    Repository(#[from] WorkboardRepositoryError),
    /// Membership lookup failed.
    #[error(transparent)]
    Membership(#[from] MembershipError),
}

/// Result type for mention dispatch operations.
pub type MentionDispatchResult<T> = Result<T, MentionDispatchError>;

/// Resolves mention tokens into edges, subscriptions, and notifications.
#[derive(Clone)]
pub struct MentionDispatcher<R, M, N, C>
where
    R: WorkboardRepository,
    M: MembershipOracle,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    membership: Arc<M>,
    sink: Arc<N>,
    clock: Arc<C>,
}

impl<R, M, N, C> MentionDispatcher<R, M, N, C>
where
    R: WorkboardRepository,
    M: MembershipOracle,
    N: NotificationSink,
    C: Clock + Send + Sync,
{
    /// Creates a new mention dispatcher.
    #[must_use]
    pub const fn new(repository: Arc<R>, membership: Arc<M>, sink: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            repository,
            membership,
            sink,
            clock,
        }
    }

    /// Subscribes a user to a task; idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`MentionDispatchError::Repository`] when edge persistence
    /// fails.
    pub async fn ensure_watching(&self, task_id: TaskId, user: UserId) -> MentionDispatchResult<()> {
        self.repository
            .ensure_watcher(WatcherEdge::new(task_id, user))
            .await?;
        Ok(())
    }

    /// Dispatches mentions found in a task's own content: for each resolved
    /// member, persists a task-mention edge, subscribes them as a watcher,
    /// and notifies them. Non-members and the author are dropped silently.
    ///
    /// # Errors
    ///
    /// Returns [`MentionDispatchError`] when edge persistence or a membership
    /// lookup fails; sink failures are logged and swallowed.
    pub async fn dispatch_task_mentions(
        &self,
        workspace: WorkspaceId,
        task: &Task,
        author: UserId,
        content: &str,
    ) -> MentionDispatchResult<()> {
        for user in self.resolve_targets(workspace, author, content).await? {
            let mention = TaskMention::new(task.id(), user, self.clock.utc());
            self.repository.add_task_mention(&mention).await?;
            self.ensure_watching(task.id(), user).await?;
            let notification = MentionNotification::mention(
                "You were mentioned",
                format!("You were mentioned in task \"{}\"", task.title()),
                MentionContext::Task { task_id: task.id() },
            );
            self.deliver(user, notification).await;
        }
        Ok(())
    }

    /// Dispatches mentions found in a comment: for each resolved member,
    /// persists a comment-mention edge, subscribes them to the commented
    /// task, and notifies them.
    ///
    /// # Errors
    ///
    /// Returns [`MentionDispatchError`] when edge persistence or a membership
    /// lookup fails; sink failures are logged and swallowed.
    pub async fn dispatch_comment_mentions(
        &self,
        workspace: WorkspaceId,
        task: &Task,
        comment: &Comment,
    ) -> MentionDispatchResult<()> {
        let targets = self
            .resolve_targets(workspace, comment.author(), comment.content())
            .await?;
        for user in targets {
            let mention = CommentMention::new(comment.id(), user, self.clock.utc());
            self.repository.add_comment_mention(&mention).await?;
            self.ensure_watching(task.id(), user).await?;
            let notification = MentionNotification::mention(
                "You were mentioned",
                format!(
                    "You were mentioned in a comment on task \"{}\"",
                    task.title()
                ),
                MentionContext::Comment {
                    task_id: task.id(),
                    comment_id: comment.id(),
                },
            );
            self.deliver(user, notification).await;
        }
        Ok(())
    }

    /// Dispatches mentions found in a chat message. Chat mentions carry no
    /// task edges; membership filtering and notification still apply.
    ///
    /// # Errors
    ///
    /// Returns [`MentionDispatchError::Membership`] when a membership lookup
    /// fails; sink failures are logged and swallowed.
    pub async fn dispatch_chat_mentions(
        &self,
        workspace: WorkspaceId,
        channel_id: ChannelId,
        author: UserId,
        content: &str,
    ) -> MentionDispatchResult<()> {
        for user in self.resolve_targets(workspace, author, content).await? {
            let notification = MentionNotification::mention(
                "You were mentioned",
                "You were mentioned in a chat message".to_owned(),
                MentionContext::Chat { channel_id },
            );
            self.deliver(user, notification).await;
        }
        Ok(())
    }

    /// Extracts mention targets and keeps only current workspace members.
    async fn resolve_targets(
        &self,
        workspace: WorkspaceId,
        author: UserId,
        content: &str,
    ) -> MentionDispatchResult<Vec<UserId>> {
        let mut members = Vec::new();
        for user in extract_mentions(content, author) {
            if self.membership.is_member(workspace, user).await? {
                members.push(user);
            }
        }
        Ok(members)
    }

    async fn deliver(&self, user: UserId, notification: MentionNotification) {
        if let Err(err) = self.sink.notify(user, notification).await {
            tracing::warn!(user = %user, error = %err, "mention notification dropped");
        }
    }
}
