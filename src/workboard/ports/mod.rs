//! Port contracts for the workboard engine.
//!
//! Ports define infrastructure-agnostic interfaces to the consumed
//! collaborators: the persistence store, the membership oracle, and the
//! notification sink.

pub mod membership;
pub mod notification;
pub mod repository;

pub use membership::{MembershipError, MembershipOracle, MembershipResult};
pub use notification::{
    MENTION_TYPE_CODE, MentionContext, MentionNotification, NotificationError, NotificationResult,
    NotificationSink,
};
pub use repository::{WorkboardRepository, WorkboardRepositoryError, WorkboardRepositoryResult};
