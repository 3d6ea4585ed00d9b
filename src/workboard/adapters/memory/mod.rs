//! In-memory adapter implementations of the workboard ports.

mod membership;
mod notification;
mod repository;

pub use membership::InMemoryMembership;
pub use notification::{RecordedNotification, RecordingNotificationSink};
pub use repository::InMemoryWorkboardRepository;
