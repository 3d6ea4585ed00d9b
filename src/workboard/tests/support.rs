//! Shared fixtures for workboard unit tests.

use std::sync::Arc;

use crate::workboard::{
    adapters::memory::{
        InMemoryMembership, InMemoryWorkboardRepository, RecordingNotificationSink,
    },
    domain::{ListId, TaskList, UserId, WorkspaceId},
    services::{RelevanceFeedService, TaskMutationService},
};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Mutation service wired to in-memory adapters and a fixed clock.
pub type TestMutationService = TaskMutationService<
    InMemoryWorkboardRepository,
    InMemoryMembership,
    RecordingNotificationSink,
    FixedClock,
>;

/// Feed service sharing the harness repository.
pub type TestFeedService = RelevanceFeedService<InMemoryWorkboardRepository, FixedClock>;

/// A seeded workspace with two members, one list, and wired services.
pub struct Harness {
    /// Shared repository.
    pub repository: Arc<InMemoryWorkboardRepository>,
    /// Shared membership set.
    pub membership: Arc<InMemoryMembership>,
    /// Shared recording sink.
    pub sink: Arc<RecordingNotificationSink>,
    /// Mutation service under test.
    pub service: TestMutationService,
    /// Seeded workspace.
    pub workspace: WorkspaceId,
    /// Seeded list with ordered status labels.
    pub list: ListId,
    /// Workspace member used as the default actor.
    pub creator: UserId,
    /// Second workspace member.
    pub colleague: UserId,
}

/// Instant all fixed-clock tests anchor to.
#[must_use]
pub fn anchor() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-05-14T08:00:00Z")
        .expect("valid anchor timestamp")
        .with_timezone(&Utc)
}

/// Builds a harness whose services observe the given instant.
#[must_use]
pub fn harness_at(now: DateTime<Utc>) -> Harness {
    let repository = Arc::new(InMemoryWorkboardRepository::new());
    let membership = Arc::new(InMemoryMembership::new());
    let sink = Arc::new(RecordingNotificationSink::new());
    let workspace = WorkspaceId::new();
    let creator = UserId::new();
    let colleague = UserId::new();

    membership
        .add_member(workspace, creator)
        .expect("membership seeding should succeed");
    membership
        .add_member(workspace, colleague)
        .expect("membership seeding should succeed");

    let list = TaskList::new(
        workspace,
        "Sprint board",
        ["Open".to_owned(), "In flight".to_owned(), "Shipped".to_owned()],
    );
    let list_id = list.id();
    repository
        .insert_list(list)
        .expect("list seeding should succeed");

    let service = TaskMutationService::new(
        Arc::clone(&repository),
        Arc::clone(&membership),
        Arc::clone(&sink),
        Arc::new(FixedClock(now)),
    );

    Harness {
        repository,
        membership,
        sink,
        service,
        workspace,
        list: list_id,
        creator,
        colleague,
    }
}

/// Builds a harness anchored at [`anchor`].
#[must_use]
pub fn harness() -> Harness {
    harness_at(anchor())
}

impl Harness {
    /// Builds a feed service over this harness's repository, observing the
    /// given instant.
    #[must_use]
    pub fn feed_at(&self, now: DateTime<Utc>) -> TestFeedService {
        RelevanceFeedService::new(Arc::clone(&self.repository), Arc::new(FixedClock(now)))
    }
}
