//! Integration tests for the notification dispatcher and activity recorder.

use assert_matches::assert_matches;
use taskboard_core::task::{TaskPriority, TaskStatus};
use taskboard_db::models::project::CreateProject;
use taskboard_db::models::task::{CreateTask, Task};
use taskboard_db::models::user::CreateUser;
use taskboard_db::repositories::{ActivityRepo, NotificationRepo, ProjectRepo, TaskRepo, UserRepo};
use taskboard_db::{create_pool, run_migrations, DbPool, IN_MEMORY_URL};
use taskboard_events::{
    ActivityRecorder, DispatchError, EventBus, NotificationDispatcher, TaskEvent, TaskEventKind,
};

struct Fixture {
    pool: DbPool,
    actor: i64,
    assignee: i64,
    task: Task,
}

async fn fixture() -> Fixture {
    let pool = create_pool(IN_MEMORY_URL, 1).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let mut ids = Vec::new();
    for name in ["owner", "dana"] {
        let user = UserRepo::create(
            &pool,
            &CreateUser {
                name: name.to_string(),
                email: format!("{name}@example.com"),
                password_hash: "x".to_string(),
            },
        )
        .await
        .unwrap();
        ids.push(user.id);
    }
    let project = ProjectRepo::create_with_owner(
        &pool,
        &CreateProject {
            name: "Website".to_string(),
            description: None,
            owner_id: ids[0],
            team_leader_id: None,
        },
    )
    .await
    .unwrap();
    let task = TaskRepo::create(
        &pool,
        &CreateTask {
            project_id: project.id,
            title: "Fix login bug".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::High,
            assignee_id: Some(ids[1]),
        },
    )
    .await
    .unwrap();

    Fixture {
        pool,
        actor: ids[0],
        assignee: ids[1],
        task,
    }
}

#[tokio::test]
async fn assigned_event_writes_one_notification_for_the_assignee() {
    let f = fixture().await;
    let dispatcher = NotificationDispatcher::new(f.pool.clone());

    let event = TaskEvent::new(TaskEventKind::Assigned, &f.task, f.actor);
    let notification = dispatcher.try_dispatch(&event).await.unwrap().unwrap();

    assert_eq!(notification.user_id, f.assignee);
    assert_eq!(notification.kind, "task_assigned");
    assert_eq!(notification.title, "New task assigned");
    assert!(notification.message.contains("Fix login bug"));
    assert_eq!(
        notification.link,
        Some(format!("/projects/{}/tasks/{}", f.task.project_id, f.task.id))
    );
    assert!(!notification.is_read);
    assert_eq!(NotificationRepo::count_for_user(&f.pool, f.assignee).await.unwrap(), 1);
}

#[tokio::test]
async fn reassigned_event_uses_reassignment_wording() {
    let f = fixture().await;
    let dispatcher = NotificationDispatcher::new(f.pool.clone());

    let event = TaskEvent::new(TaskEventKind::Reassigned, &f.task, f.actor);
    let notification = dispatcher.dispatch(&event).await.unwrap();

    assert_eq!(notification.kind, "task_reassigned");
    assert_eq!(notification.title, "Task reassigned");
}

#[tokio::test]
async fn other_events_are_ignored() {
    let f = fixture().await;
    let dispatcher = NotificationDispatcher::new(f.pool.clone());

    let event = TaskEvent::new(TaskEventKind::Updated, &f.task, f.actor);
    assert!(dispatcher.try_dispatch(&event).await.unwrap().is_none());
    assert_eq!(NotificationRepo::count_for_user(&f.pool, f.assignee).await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_recipient_fails_and_dispatch_swallows_it() {
    let f = fixture().await;
    let dispatcher = NotificationDispatcher::new(f.pool.clone());
    let mut task = f.task.clone();
    task.assignee_id = Some(9999);

    let event = TaskEvent::new(TaskEventKind::Reassigned, &task, f.actor);
    assert_matches!(
        dispatcher.try_dispatch(&event).await,
        Err(DispatchError::UnknownRecipient(9999))
    );
    assert!(dispatcher.dispatch(&event).await.is_none());
}

#[tokio::test]
async fn assignment_event_without_assignee_is_rejected() {
    let f = fixture().await;
    let dispatcher = NotificationDispatcher::new(f.pool.clone());
    let mut task = f.task.clone();
    task.assignee_id = None;

    let event = TaskEvent::new(TaskEventKind::Assigned, &task, f.actor);
    assert_matches!(
        dispatcher.try_dispatch(&event).await,
        Err(DispatchError::MissingRecipient(TaskEventKind::Assigned))
    );
}

#[tokio::test]
async fn recorder_writes_lifecycle_activity_until_the_bus_closes() {
    let f = fixture().await;
    let bus = EventBus::default();
    let receiver = bus.subscribe();

    bus.publish(TaskEvent::new(TaskEventKind::Created, &f.task, f.actor));
    bus.publish(TaskEvent::new(TaskEventKind::Deleted, &f.task, f.actor));
    drop(bus);

    ActivityRecorder::run(f.pool.clone(), receiver).await;

    let activity = ActivityRepo::list_for_task(&f.pool, f.task.id).await.unwrap();
    let kinds: Vec<&str> = activity.iter().map(|a| a.entry.kind.as_str()).collect();
    assert_eq!(kinds, vec!["deleted", "created"]);
    assert!(activity.iter().all(|a| a.entry.user_id == f.actor));
    assert_eq!(activity[0].entry.description, "moved \"Fix login bug\" to trash");
}
