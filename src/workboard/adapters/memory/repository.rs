//! Thread-safe in-memory workboard repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::workboard::{
    domain::{
        ActivityRecord, Comment, CommentId, CommentMention, ListId, Tag, TagId, Task, TaskId,
        TaskList, TaskMention, UserId, WatcherEdge, WorkspaceId,
    },
    ports::{WorkboardRepository, WorkboardRepositoryError, WorkboardRepositoryResult},
};

/// In-memory workboard repository backed by a single lock, so every
/// repository call is atomic with respect to every other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkboardRepository {
    state: Arc<RwLock<InMemoryWorkboardState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorkboardState {
    tasks: HashMap<TaskId, Task>,
    lists: HashMap<ListId, TaskList>,
    tags: HashMap<TagId, Tag>,
    comments: HashMap<CommentId, Comment>,
    activities: HashMap<TaskId, Vec<ActivityRecord>>,
    watchers: BTreeSet<(TaskId, UserId)>,
    task_mentions: BTreeMap<(TaskId, UserId), DateTime<Utc>>,
    comment_mentions: BTreeMap<(CommentId, UserId), DateTime<Utc>>,
}

fn lock_error(err: impl std::fmt::Display) -> WorkboardRepositoryError {
    WorkboardRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryWorkboardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a task list, normally the job of the workspace plumbing outside
    /// this engine.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn insert_list(&self, list: TaskList) -> WorkboardRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.lists.insert(list.id(), list);
        Ok(())
    }

    /// Seeds a workspace tag.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the state lock is poisoned.
    pub fn insert_tag(&self, tag: Tag) -> WorkboardRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.tags.insert(tag.id(), tag);
        Ok(())
    }
}

/// Collects a task and all its transitive subtasks.
fn subtree_ids(state: &InMemoryWorkboardState, root: TaskId) -> Vec<TaskId> {
    let mut doomed = Vec::new();
    let mut pending = vec![root];
    while let Some(task_id) = pending.pop() {
        doomed.push(task_id);
        pending.extend(
            state
                .tasks
                .values()
                .filter(|task| task.parent_id() == Some(task_id))
                .map(Task::id),
        );
    }
    doomed
}

fn remove_task_rows(state: &mut InMemoryWorkboardState, task_id: TaskId) {
    state.tasks.remove(&task_id);
    state.activities.remove(&task_id);
    state.watchers.retain(|(task, _)| *task != task_id);
    state.task_mentions.retain(|(task, _), _| *task != task_id);

    let comment_ids: Vec<CommentId> = state
        .comments
        .values()
        .filter(|comment| comment.task_id() == task_id)
        .map(Comment::id)
        .collect();
    for comment_id in &comment_ids {
        state.comments.remove(comment_id);
    }
    state
        .comment_mentions
        .retain(|(comment, _), _| !comment_ids.contains(comment));
}

#[async_trait]
impl WorkboardRepository for InMemoryWorkboardRepository {
    async fn create_task(
        &self,
        task: &Task,
        activity: &ActivityRecord,
    ) -> WorkboardRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(WorkboardRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        state
            .activities
            .entry(task.id())
            .or_default()
            .push(activity.clone());
        Ok(())
    }

    async fn update_task(
        &self,
        task: &Task,
        activities: &[ActivityRecord],
    ) -> WorkboardRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(WorkboardRepositoryError::TaskNotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        state
            .activities
            .entry(task.id())
            .or_default()
            .extend_from_slice(activities);
        Ok(())
    }

    async fn delete_task(
        &self,
        workspace: WorkspaceId,
        task_id: TaskId,
    ) -> WorkboardRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let in_workspace = state
            .tasks
            .get(&task_id)
            .is_some_and(|task| task.workspace_id() == workspace);
        if !in_workspace {
            return Err(WorkboardRepositoryError::TaskNotFound(task_id));
        }
        for doomed in subtree_ids(&state, task_id) {
            remove_task_rows(&mut state, doomed);
        }
        Ok(())
    }

    async fn find_task(
        &self,
        workspace: WorkspaceId,
        task_id: TaskId,
    ) -> WorkboardRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let task = state
            .tasks
            .get(&task_id)
            .filter(|task| task.workspace_id() == workspace)
            .cloned();
        Ok(task)
    }

    async fn tasks_in_workspace(
        &self,
        workspace: WorkspaceId,
    ) -> WorkboardRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.workspace_id() == workspace)
            .cloned()
            .collect())
    }

    async fn max_order_index(
        &self,
        workspace: WorkspaceId,
        list_id: ListId,
    ) -> WorkboardRepositoryResult<Option<i64>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.workspace_id() == workspace && task.list_id() == list_id)
            .map(Task::order_index)
            .max())
    }

    async fn find_list(
        &self,
        workspace: WorkspaceId,
        list_id: ListId,
    ) -> WorkboardRepositoryResult<Option<TaskList>> {
        let state = self.state.read().map_err(lock_error)?;
        let list = state
            .lists
            .get(&list_id)
            .filter(|list| list.workspace_id() == workspace)
            .cloned();
        Ok(list)
    }

    async fn resolve_tags(
        &self,
        workspace: WorkspaceId,
        requested: &[TagId],
    ) -> WorkboardRepositoryResult<Vec<TagId>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut seen = HashSet::new();
        Ok(requested
            .iter()
            .copied()
            .filter(|tag_id| {
                state
                    .tags
                    .get(tag_id)
                    .is_some_and(|tag| tag.workspace_id() == workspace)
                    && seen.insert(*tag_id)
            })
            .collect())
    }

    async fn add_comment(&self, comment: &Comment) -> WorkboardRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.comments.insert(comment.id(), comment.clone());
        Ok(())
    }

    async fn comments_for_task(&self, task_id: TaskId) -> WorkboardRepositoryResult<Vec<Comment>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|comment| comment.task_id() == task_id)
            .cloned()
            .collect();
        comments.sort_by_key(Comment::created_at);
        Ok(comments)
    }

    async fn activities_for_task(
        &self,
        task_id: TaskId,
    ) -> WorkboardRepositoryResult<Vec<ActivityRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut records = state.activities.get(&task_id).cloned().unwrap_or_default();
        records.sort_by_key(ActivityRecord::recorded_at);
        Ok(records)
    }

    async fn ensure_watcher(&self, edge: WatcherEdge) -> WorkboardRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.watchers.insert((edge.task_id(), edge.user_id()));
        Ok(())
    }

    async fn watchers(&self, task_id: TaskId) -> WorkboardRepositoryResult<Vec<UserId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .watchers
            .iter()
            .filter(|(task, _)| *task == task_id)
            .map(|(_, user)| *user)
            .collect())
    }

    async fn add_task_mention(&self, mention: &TaskMention) -> WorkboardRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .task_mentions
            .entry((mention.task_id(), mention.user_id()))
            .or_insert_with(|| mention.created_at());
        Ok(())
    }

    async fn add_comment_mention(
        &self,
        mention: &CommentMention,
    ) -> WorkboardRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .comment_mentions
            .entry((mention.comment_id(), mention.user_id()))
            .or_insert_with(|| mention.created_at());
        Ok(())
    }

    async fn task_mention_users(&self, task_id: TaskId) -> WorkboardRepositoryResult<Vec<UserId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .task_mentions
            .keys()
            .filter(|(task, _)| *task == task_id)
            .map(|(_, user)| *user)
            .collect())
    }

    async fn comment_mention_users(
        &self,
        task_id: TaskId,
    ) -> WorkboardRepositoryResult<Vec<UserId>> {
        let state = self.state.read().map_err(lock_error)?;
        let comment_ids: HashSet<CommentId> = state
            .comments
            .values()
            .filter(|comment| comment.task_id() == task_id)
            .map(Comment::id)
            .collect();
        let users: BTreeSet<UserId> = state
            .comment_mentions
            .keys()
            .filter(|(comment, _)| comment_ids.contains(comment))
            .map(|(_, user)| *user)
            .collect();
        Ok(users.into_iter().collect())
    }
}
