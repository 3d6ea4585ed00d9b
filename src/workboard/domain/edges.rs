//! Keyed edge sets linking tasks and comments to users.
//!
//! Watcher and mention relationships are modelled as explicit composite-key
//! edges with insert-if-absent semantics, not as in-memory back-references.

use super::{CommentId, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription edge granting a user feed visibility of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WatcherEdge {
    task_id: TaskId,
    user_id: UserId,
}

impl WatcherEdge {
    /// Creates a watcher edge.
    #[must_use]
    pub const fn new(task_id: TaskId, user_id: UserId) -> Self {
        Self { task_id, user_id }
    }

    /// Returns the watched task's identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the watching member.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Edge recording that a user was mentioned in a task's own content.
///
/// Keyed by `(task_id, user_id)`; the creation timestamp is informational and
/// does not participate in identity, so repeated mentions stay one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMention {
    task_id: TaskId,
    user_id: UserId,
    created_at: DateTime<Utc>,
}

impl TaskMention {
    /// Creates a task-mention edge.
    #[must_use]
    pub const fn new(task_id: TaskId, user_id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            task_id,
            user_id,
            created_at,
        }
    }

    /// Returns the mentioning task's identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the mentioned member.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns when the mention was first recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Edge recording that a user was mentioned in a comment.
///
/// Keyed by `(comment_id, user_id)` with the same identity rules as
/// [`TaskMention`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentMention {
    comment_id: CommentId,
    user_id: UserId,
    created_at: DateTime<Utc>,
}

impl CommentMention {
    /// Creates a comment-mention edge.
    #[must_use]
    pub const fn new(comment_id: CommentId, user_id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            comment_id,
            user_id,
            created_at,
        }
    }

    /// Returns the mentioning comment's identifier.
    #[must_use]
    pub const fn comment_id(&self) -> CommentId {
        self.comment_id
    }

    /// Returns the mentioned member.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns when the mention was first recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
