//! Relevance feed scenarios across mutation, mentions, and ranking.

use super::helpers::{World, anchor, mention, world};
use atelier::workboard::{
    domain::{TaskId, TaskStatus},
    ports::{MentionContext, WorkboardRepository},
    services::{CreateTaskRequest, FeedItem},
};
use chrono::TimeDelta;
use rstest::{fixture, rstest};

#[fixture]
fn seeded() -> World {
    world()
}

fn item_for(items: &[FeedItem], task_id: TaskId) -> &FeedItem {
    items
        .iter()
        .find(|item| item.task.id() == task_id)
        .expect("task should appear in feed")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creator_of_unassigned_task_sees_it_as_watcher(seeded: World) {
    let task = seeded
        .service
        .create(
            seeded.workspace,
            seeded.alice,
            CreateTaskRequest::new(seeded.list, "Unowned"),
        )
        .await
        .expect("task creation should succeed");

    let items = seeded
        .feed()
        .my_tasks(seeded.workspace, seeded.alice)
        .await
        .expect("feed should build");
    let item = item_for(&items, task.id());
    assert!(!item.is_assigned);
    assert!(item.is_watching);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comment_mention_pulls_a_stranger_into_the_feed(seeded: World) {
    let task = seeded
        .service
        .create(
            seeded.workspace,
            seeded.bob,
            CreateTaskRequest::new(seeded.list, "Bob's task"),
        )
        .await
        .expect("task creation should succeed");

    let comment = seeded
        .service
        .add_comment(
            seeded.workspace,
            seeded.bob,
            task.id(),
            format!("needs eyes from {}", mention(seeded.carol)),
        )
        .await
        .expect("comment should persist");

    let watchers = seeded
        .repository
        .watchers(task.id())
        .await
        .expect("watchers should load");
    assert!(watchers.contains(&seeded.carol));
    let mentioned = seeded
        .repository
        .comment_mention_users(task.id())
        .await
        .expect("mention lookup should succeed");
    assert_eq!(mentioned, vec![seeded.carol]);

    let items = seeded
        .feed()
        .my_tasks(seeded.workspace, seeded.carol)
        .await
        .expect("feed should build");
    let item = item_for(&items, task.id());
    assert!(item.is_mentioned);
    assert!(!item.is_assigned);

    let deliveries = seeded.sink.deliveries().expect("sink snapshot");
    let delivery = deliveries.first().expect("one delivery");
    assert_eq!(delivery.user, seeded.carol);
    assert_eq!(
        delivery.notification.context,
        MentionContext::Comment {
            task_id: task.id(),
            comment_id: comment.id(),
        }
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn yesterdays_due_date_makes_an_in_progress_task_overdue(seeded: World) {
    let task = seeded
        .service
        .create(
            seeded.workspace,
            seeded.alice,
            CreateTaskRequest::new(seeded.list, "Slipping")
                .with_status(TaskStatus::InProgress)
                .with_due_date(anchor() - TimeDelta::days(1)),
        )
        .await
        .expect("task creation should succeed");

    let items = seeded
        .feed()
        .my_tasks(seeded.workspace, seeded.alice)
        .await
        .expect("feed should build");
    let item = item_for(&items, task.id());
    assert!(item.is_overdue);
    assert!(item.urgency >= 100);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blocked_task_due_today_nets_a_score_of_ten(seeded: World) {
    let task = seeded
        .service
        .create(
            seeded.workspace,
            seeded.alice,
            CreateTaskRequest::new(seeded.list, "Waiting on vendor")
                .with_status(TaskStatus::Blocked)
                .with_due_date(anchor() + TimeDelta::hours(6)),
        )
        .await
        .expect("task creation should succeed");

    let items = seeded
        .feed()
        .my_tasks(seeded.workspace, seeded.alice)
        .await
        .expect("feed should build");
    let item = item_for(&items, task.id());
    assert!(item.is_blocked);
    assert!(item.is_due_today);
    assert_eq!(item.urgency, 10);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_is_isolated_per_workspace_and_per_user(seeded: World) {
    seeded
        .service
        .create(
            seeded.workspace,
            seeded.alice,
            CreateTaskRequest::new(seeded.list, "Alice only"),
        )
        .await
        .expect("task creation should succeed");

    let bob_items = seeded
        .feed()
        .my_tasks(seeded.workspace, seeded.bob)
        .await
        .expect("feed should build");
    assert!(bob_items.is_empty());

    let foreign = atelier::workboard::domain::WorkspaceId::new();
    let foreign_items = seeded
        .feed()
        .my_tasks(foreign, seeded.alice)
        .await
        .expect("feed should build");
    assert!(foreign_items.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_mentions_and_deadlines_compound_in_the_ranking(seeded: World) {
    let urgent = seeded
        .service
        .create(
            seeded.workspace,
            seeded.alice,
            CreateTaskRequest::new(seeded.list, "Overdue and discussed")
                .with_assignee(seeded.bob)
                .with_due_date(anchor() - TimeDelta::hours(3)),
        )
        .await
        .expect("task creation should succeed");
    seeded
        .service
        .add_comment(
            seeded.workspace,
            seeded.alice,
            urgent.id(),
            format!("any update, {}?", mention(seeded.bob)),
        )
        .await
        .expect("comment should persist");
    let quiet = seeded
        .service
        .create(
            seeded.workspace,
            seeded.alice,
            CreateTaskRequest::new(seeded.list, "Background chore").with_assignee(seeded.bob),
        )
        .await
        .expect("task creation should succeed");

    let items = seeded
        .feed()
        .my_tasks(seeded.workspace, seeded.bob)
        .await
        .expect("feed should build");

    let urgent_item = item_for(&items, urgent.id());
    assert!(urgent_item.is_assigned);
    assert!(urgent_item.is_mentioned);
    assert!(urgent_item.is_overdue);
    assert_eq!(urgent_item.urgency, 115);

    let quiet_item = item_for(&items, quiet.id());
    assert_eq!(quiet_item.urgency, 0);
    assert_eq!(
        items.first().expect("non-empty feed").task.id(),
        urgent.id()
    );
}
