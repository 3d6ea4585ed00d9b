//! Relevance feed builder: the personalized "my tasks" ranking.
//!
//! A pure read path fanning in from tasks, watcher edges, mention edges, and
//! activity records. The urgency score is an advisory ranking heuristic and
//! is never persisted.

use crate::workboard::{
    domain::{ActivityRecord, Task, TaskStatus, UserId, WorkspaceId},
    ports::{WorkboardRepository, WorkboardRepositoryError},
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::cmp::Reverse;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while building a relevance feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Repository read failed.
    #[error(transparent)]
    Repository(#[from] WorkboardRepositoryError),
}

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;

/// One ranked entry in a personal feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// The selected task.
    pub task: Task,
    /// The user is the current assignee.
    pub is_assigned: bool,
    /// The user holds a watcher edge on the task.
    pub is_watching: bool,
    /// The user is mentioned in the task's own content or in any comment.
    pub is_mentioned: bool,
    /// The task status is blocked.
    pub is_blocked: bool,
    /// The due date has passed and the task is not done.
    pub is_overdue: bool,
    /// The due date falls on the current UTC day.
    pub is_due_today: bool,
    /// The due date falls within the next seven days.
    pub is_due_this_week: bool,
    /// Timestamp of the latest activity record, falling back to the task's
    /// `updated_at` when no activity exists.
    pub last_activity_at: DateTime<Utc>,
    /// Ranking score; higher sorts first.
    pub urgency: i64,
}

/// Builds personalized ranked feeds over the workboard entities.
#[derive(Clone)]
pub struct RelevanceFeedService<R, C>
where
    R: WorkboardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> RelevanceFeedService<R, C>
where
    R: WorkboardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new relevance feed service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the user's personal feed for the workspace, sorted descending
    /// by urgency.
    ///
    /// A task is selected when the user is its assignee, watches it, or is
    /// mentioned in it directly or through any of its comments. The ranking
    /// may be stale relative to concurrent mutations; it is advisory only.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Repository`] when a repository read fails.
    pub async fn my_tasks(
        &self,
        workspace: WorkspaceId,
        user: UserId,
    ) -> FeedResult<Vec<FeedItem>> {
        let now = self.clock.utc();
        let mut items = Vec::new();
        for task in self.repository.tasks_in_workspace(workspace).await? {
            if let Some(item) = self.build_item(task, user, now).await? {
                items.push(item);
            }
        }
        items.sort_by_key(|item| Reverse(item.urgency));
        Ok(items)
    }

    /// Derives one feed item, or `None` when the user has no relation to the
    /// task.
    async fn build_item(
        &self,
        task: Task,
        user: UserId,
        now: DateTime<Utc>,
    ) -> FeedResult<Option<FeedItem>> {
        let is_assigned = task.assignee() == Some(user);
        let is_watching = self.repository.watchers(task.id()).await?.contains(&user);
        let mentioned_in_task = self
            .repository
            .task_mention_users(task.id())
            .await?
            .contains(&user);
        let mentioned_in_comment = self
            .repository
            .comment_mention_users(task.id())
            .await?
            .contains(&user);
        let is_mentioned = mentioned_in_task || mentioned_in_comment;
        if !(is_assigned || is_watching || is_mentioned) {
            return Ok(None);
        }

        let last_activity_at = self
            .repository
            .activities_for_task(task.id())
            .await?
            .iter()
            .map(ActivityRecord::recorded_at)
            .max()
            .unwrap_or_else(|| task.updated_at());

        let due = task.due_date();
        let is_blocked = task.status() == TaskStatus::Blocked;
        let is_overdue =
            due.is_some_and(|date| date < now && task.status() != TaskStatus::Done);
        let is_due_today = due.is_some_and(|date| date.date_naive() == now.date_naive());
        let is_due_this_week =
            due.is_some_and(|date| now <= date && date <= now + TimeDelta::days(7));

        let mut item = FeedItem {
            task,
            is_assigned,
            is_watching,
            is_mentioned,
            is_blocked,
            is_overdue,
            is_due_today,
            is_due_this_week,
            last_activity_at,
            urgency: 0,
        };
        item.urgency = urgency_score(&item, now);
        Ok(Some(item))
    }
}

/// Window within which recent activity contributes urgency.
const RECENT_ACTIVITY_HOURS: i64 = 4;

/// Computes the additive urgency heuristic for one feed item.
///
/// The due-date bands score as an exclusive chain (overdue, else due today,
/// else due this week) even though the boolean flags themselves can overlap.
fn urgency_score(item: &FeedItem, now: DateTime<Utc>) -> i64 {
    let mut score = 0;
    if item.is_overdue {
        score += 100;
    } else if item.is_due_today {
        score += 60;
    } else if item.is_due_this_week {
        score += 30;
    }
    if item.task.priority().is_elevated() {
        score += 20;
    }
    if item.is_mentioned {
        score += 15;
    }
    if now - item.last_activity_at < TimeDelta::hours(RECENT_ACTIVITY_HOURS) {
        score += 10;
    }
    if item.is_blocked {
        score -= 50;
    }
    score
}
