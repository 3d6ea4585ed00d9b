//! End-to-end mutation, audit-trail, and cascade scenarios.

use super::helpers::{World, mention, world};
use atelier::workboard::{
    domain::{ActivityKind, Priority, TaskPatch, TaskStatus},
    ports::WorkboardRepository,
    services::{CreateTaskRequest, TaskMutationError},
};
use rstest::{fixture, rstest};

#[fixture]
fn seeded() -> World {
    world()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_task_lifecycle_leaves_a_consistent_audit_trail(seeded: World) {
    let task = seeded
        .service
        .create(
            seeded.workspace,
            seeded.alice,
            CreateTaskRequest::new(seeded.list, "Roll out the importer")
                .with_description("first pass, no mentions yet"),
        )
        .await
        .expect("task creation should succeed");

    seeded
        .service
        .update(
            seeded.workspace,
            seeded.alice,
            task.id(),
            TaskPatch::new()
                .with_status(TaskStatus::InProgress)
                .with_priority(Priority::High)
                .assign(seeded.bob),
        )
        .await
        .expect("first update should succeed");
    seeded
        .service
        .update(
            seeded.workspace,
            seeded.bob,
            task.id(),
            TaskPatch::new()
                .with_status(TaskStatus::InReview)
                .with_title("Roll out the importer v2"),
        )
        .await
        .expect("assignee update should succeed");

    let activities = seeded
        .service
        .activity_log(seeded.workspace, task.id())
        .await
        .expect("activity log should load");

    // One Created plus five field changes.
    assert_eq!(activities.len(), 6);
    assert_eq!(
        activities
            .iter()
            .filter(|activity| activity.kind() == ActivityKind::Created)
            .count(),
        1
    );

    // Consecutive records touching one field form a chain.
    for kind in [
        ActivityKind::StatusChanged,
        ActivityKind::TitleChanged,
        ActivityKind::PriorityChanged,
        ActivityKind::AssigneeChanged,
    ] {
        let per_field: Vec<_> = activities
            .iter()
            .filter(|activity| activity.kind() == kind)
            .collect();
        for pair in per_field.windows(2) {
            let earlier = pair.first().expect("window start");
            let later = pair.get(1).expect("window end");
            assert_eq!(later.old_value(), earlier.new_value());
        }
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blocked_detours_are_recorded_not_rejected(seeded: World) {
    let task = seeded
        .service
        .create(
            seeded.workspace,
            seeded.alice,
            CreateTaskRequest::new(seeded.list, "Flaky dependency"),
        )
        .await
        .expect("task creation should succeed");

    for status in [
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Blocked,
        TaskStatus::InReview,
        TaskStatus::Done,
    ] {
        seeded
            .service
            .update(
                seeded.workspace,
                seeded.alice,
                task.id(),
                TaskPatch::new().with_status(status),
            )
            .await
            .expect("detour transitions should be permitted");
    }

    let activities = seeded
        .service
        .activity_log(seeded.workspace, task.id())
        .await
        .expect("activity log should load");
    let transitions = activities
        .iter()
        .filter(|activity| activity.kind() == ActivityKind::StatusChanged)
        .count();
    assert_eq!(transitions, 7);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsider_mutation_is_rejected_and_nothing_changes(seeded: World) {
    let task = seeded
        .service
        .create(
            seeded.workspace,
            seeded.alice,
            CreateTaskRequest::new(seeded.list, "Hands off"),
        )
        .await
        .expect("task creation should succeed");

    let result = seeded
        .service
        .update(
            seeded.workspace,
            seeded.carol,
            task.id(),
            TaskPatch::new()
                .with_status(TaskStatus::Done)
                .with_title("Hijacked"),
        )
        .await;
    assert!(matches!(
        result,
        Err(TaskMutationError::PermissionDenied { .. })
    ));

    let current = seeded
        .repository
        .find_task(seeded.workspace, task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should still exist");
    assert_eq!(current, task);
    let activities = seeded
        .service
        .activity_log(seeded.workspace, task.id())
        .await
        .expect("activity log should load");
    assert_eq!(activities.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_cascades_and_later_fetches_are_not_found(seeded: World) {
    let task = seeded
        .service
        .create(
            seeded.workspace,
            seeded.alice,
            CreateTaskRequest::new(seeded.list, "Doomed"),
        )
        .await
        .expect("task creation should succeed");
    let subtask = seeded
        .service
        .create(
            seeded.workspace,
            seeded.alice,
            CreateTaskRequest::new(seeded.list, "Doomed child").with_parent(task.id()),
        )
        .await
        .expect("subtask creation should succeed");
    seeded
        .service
        .add_comment(
            seeded.workspace,
            seeded.bob,
            task.id(),
            format!("looping in {}", mention(seeded.carol)),
        )
        .await
        .expect("comment should persist");

    seeded
        .service
        .delete(seeded.workspace, seeded.alice, task.id())
        .await
        .expect("delete should succeed");

    for task_id in [task.id(), subtask.id()] {
        assert!(
            seeded
                .repository
                .find_task(seeded.workspace, task_id)
                .await
                .expect("lookup should succeed")
                .is_none()
        );
        assert!(
            seeded
                .repository
                .activities_for_task(task_id)
                .await
                .expect("activity lookup should succeed")
                .is_empty()
        );
    }
    assert!(
        seeded
            .repository
            .comments_for_task(task.id())
            .await
            .expect("comment lookup should succeed")
            .is_empty()
    );
    assert!(
        seeded
            .repository
            .comment_mention_users(task.id())
            .await
            .expect("mention lookup should succeed")
            .is_empty()
    );

    let refetch = seeded
        .service
        .activity_log(seeded.workspace, task.id())
        .await;
    assert!(matches!(refetch, Err(TaskMutationError::TaskNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_are_scoped_to_their_workspace(seeded: World) {
    let task = seeded
        .service
        .create(
            seeded.workspace,
            seeded.alice,
            CreateTaskRequest::new(seeded.list, "Tenant bound"),
        )
        .await
        .expect("task creation should succeed");

    let foreign_workspace = atelier::workboard::domain::WorkspaceId::new();
    let result = seeded
        .service
        .update(
            foreign_workspace,
            seeded.alice,
            task.id(),
            TaskPatch::new().with_status(TaskStatus::Done),
        )
        .await;
    assert!(matches!(result, Err(TaskMutationError::TaskNotFound(_))));
}
