//! Shared helpers for in-memory integration tests.

use std::sync::Arc;

use atelier::workboard::{
    adapters::memory::{
        InMemoryMembership, InMemoryWorkboardRepository, RecordingNotificationSink,
    },
    domain::{ListId, TaskList, UserId, WorkspaceId},
    services::{RelevanceFeedService, TaskMutationService},
};
use chrono::{DateTime, Local, TimeDelta, Utc};
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

/// Mutation service wired to the in-memory adapters.
pub type TestMutationService = TaskMutationService<
    InMemoryWorkboardRepository,
    InMemoryMembership,
    RecordingNotificationSink,
    FixedClock,
>;

/// A seeded workspace: three members, one list, wired services.
pub struct World {
    /// Shared repository.
    pub repository: Arc<InMemoryWorkboardRepository>,
    /// Shared recording sink.
    pub sink: Arc<RecordingNotificationSink>,
    /// Mutation service under test.
    pub service: TestMutationService,
    /// Seeded workspace.
    pub workspace: WorkspaceId,
    /// Seeded list with ordered status labels.
    pub list: ListId,
    /// First member.
    pub alice: UserId,
    /// Second member.
    pub bob: UserId,
    /// Third member.
    pub carol: UserId,
}

/// Instant the fixed-clock worlds anchor to.
#[must_use]
pub fn anchor() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-05-14T08:00:00Z")
        .expect("valid anchor timestamp")
        .with_timezone(&Utc)
}

/// Builds a seeded world whose services observe [`anchor`].
#[must_use]
pub fn world() -> World {
    let repository = Arc::new(InMemoryWorkboardRepository::new());
    let membership = Arc::new(InMemoryMembership::new());
    let sink = Arc::new(RecordingNotificationSink::new());
    let workspace = WorkspaceId::new();
    let alice = UserId::new();
    let bob = UserId::new();
    let carol = UserId::new();

    for user in [alice, bob, carol] {
        membership
            .add_member(workspace, user)
            .expect("membership seeding should succeed");
    }

    let list = TaskList::new(
        workspace,
        "Delivery board",
        ["Open".to_owned(), "In flight".to_owned(), "Shipped".to_owned()],
    );
    let list_id = list.id();
    repository
        .insert_list(list)
        .expect("list seeding should succeed");

    let service = TaskMutationService::new(
        Arc::clone(&repository),
        membership,
        Arc::clone(&sink),
        Arc::new(FixedClock(anchor())),
    );

    World {
        repository,
        sink,
        service,
        workspace,
        list: list_id,
        alice,
        bob,
        carol,
    }
}

impl World {
    /// Builds a feed service over this world's repository, observing five
    /// hours past the anchor so creation-time activity falls outside the
    /// recency window.
    #[must_use]
    pub fn feed(&self) -> RelevanceFeedService<InMemoryWorkboardRepository, FixedClock> {
        RelevanceFeedService::new(
            Arc::clone(&self.repository),
            Arc::new(FixedClock(anchor() + TimeDelta::hours(5))),
        )
    }
}

/// Renders a mention token for the given user.
#[must_use]
pub fn mention(user: UserId) -> String {
    format!("<@{}|teammate>", user.into_inner())
}
