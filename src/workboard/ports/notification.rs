//! Notification sink port and the structured mention payload.

use crate::workboard::domain::{ChannelId, CommentId, TaskId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Fixed type code carried by every mention notification.
pub const MENTION_TYPE_CODE: &str = "Mention";

/// Result type for notification delivery.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Structured context identifying where a mention happened.
///
/// A tagged variant per trigger context with explicit fields, not an untyped
/// property bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "context_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MentionContext {
    /// Mention inside a task's own content.
    Task {
        /// The mentioning task.
        task_id: TaskId,
    },
    /// Mention inside a comment on a task.
    Comment {
        /// The commented task.
        task_id: TaskId,
        /// The mentioning comment.
        comment_id: CommentId,
    },
    /// Mention inside a chat message.
    Chat {
        /// The channel carrying the message.
        channel_id: ChannelId,
    },
}

/// A composed notification handed to the external sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionNotification {
    /// Short human-readable title.
    pub title: String,
    /// Composed human-readable message.
    pub message: String,
    /// Notification type code; always [`MENTION_TYPE_CODE`] for mentions.
    pub type_code: String,
    /// Structured context payload.
    pub context: MentionContext,
}

impl MentionNotification {
    /// Composes a mention notification with the fixed type code.
    #[must_use]
    pub fn mention(
        title: impl Into<String>,
        message: impl Into<String>,
        context: MentionContext,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            type_code: MENTION_TYPE_CODE.to_owned(),
            context,
        }
    }
}

/// External best-effort notification collaborator.
///
/// Delivery is fire-and-forget relative to the triggering mutation: a sink
/// failure must never unwind a committed change.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers a notification to the given user.
    async fn notify(
        &self,
        user: UserId,
        notification: MentionNotification,
    ) -> NotificationResult<()>;
}

/// Errors returned by notification sink implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// Delivery to the external sink failed.
    #[error("notification delivery error: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
