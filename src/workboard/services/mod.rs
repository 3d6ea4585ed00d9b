//! Application services orchestrating the workboard domain.

mod feed;
mod mentions;
mod mutation;

pub use feed::{FeedError, FeedItem, FeedResult, RelevanceFeedService};
pub use mentions::{MentionDispatchError, MentionDispatchResult, MentionDispatcher};
pub use mutation::{
    CreateTaskRequest, TaskMutationError, TaskMutationResult, TaskMutationService,
};
