//! Comment entity attached to a task.

use super::{CommentId, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A comment on a task; its content may itself contain mention tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author: UserId,
    content: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        author: UserId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CommentId::new(),
            task_id,
            author,
            content: content.into(),
            created_at: clock.utc(),
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the commented task's identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the authoring member.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the comment content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
