//! Domain model for the task activity, mention, and relevance engine.
//!
//! The workboard domain models permission-gated task mutation with an
//! append-only audit trail, mention extraction from free text, and the
//! watcher/mention edge sets that feed the personal relevance ranking, while
//! keeping all infrastructure concerns outside of the domain boundary.

mod activity;
mod comment;
mod edges;
mod error;
mod ids;
mod list;
mod mention;
mod task;

pub use activity::{ActivityKind, ActivityRecord};
pub use comment::Comment;
pub use edges::{CommentMention, TaskMention, WatcherEdge};
pub use error::{
    ParseActivityKindError, ParsePriorityError, ParseStatusError, TaskDomainError,
};
pub use ids::{ChannelId, CommentId, ListId, TagId, TaskId, UserId, WorkspaceId};
pub use list::{Tag, TaskList};
pub use mention::extract_mentions;
pub use task::{NewTaskData, Priority, Task, TaskPatch, TaskStatus};
