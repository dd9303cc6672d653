//! Task events and the in-process bus that fans them out.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use taskboard_core::types::DbId;
use taskboard_db::models::task::Task;
use tokio::sync::broadcast;

/// What happened to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TaskEventKind {
    #[serde(rename = "task.created")]
    Created,
    #[serde(rename = "task.updated")]
    Updated,
    /// Created with an assignee.
    #[serde(rename = "task.assigned")]
    Assigned,
    /// Moved to a different, non-empty assignee.
    #[serde(rename = "task.reassigned")]
    Reassigned,
    #[serde(rename = "task.deleted")]
    Deleted,
    #[serde(rename = "task.restored")]
    Restored,
}

impl TaskEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskEventKind::Created => "task.created",
            TaskEventKind::Updated => "task.updated",
            TaskEventKind::Assigned => "task.assigned",
            TaskEventKind::Reassigned => "task.reassigned",
            TaskEventKind::Deleted => "task.deleted",
            TaskEventKind::Restored => "task.restored",
        }
    }
}

impl fmt::Display for TaskEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task event, carrying the task as it was right after the change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEvent {
    pub kind: TaskEventKind,
    pub task_id: DbId,
    pub project_id: DbId,
    pub task_title: String,
    pub assignee_id: Option<DbId>,
    /// The user whose request caused the event.
    pub actor_user_id: DbId,
    pub occurred_at: DateTime<Utc>,
}

impl TaskEvent {
    pub fn new(kind: TaskEventKind, task: &Task, actor_user_id: DbId) -> Self {
        Self {
            kind,
            task_id: task.id,
            project_id: task.project_id,
            task_title: task.title.clone(),
            assignee_id: task.assignee_id,
            actor_user_id,
            occurred_at: Utc::now(),
        }
    }
}

/// Events a slow subscriber may fall behind by before it starts missing some.
const DEFAULT_CAPACITY: usize = 1024;

/// Broadcast hub: every subscriber sees every event published after it
/// subscribed. Shared as `Arc<EventBus>`.
pub struct EventBus {
    sender: broadcast::Sender<TaskEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to current subscribers. With none, the event is dropped.
    pub fn publish(&self, event: TaskEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("Event published with no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        let now = Utc::now();
        Task {
            id: 55,
            project_id: 101,
            title: "Fix login bug".to_string(),
            description: None,
            status: "Todo".to_string(),
            priority: "High".to_string(),
            assignee_id: Some(7),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn event_snapshots_the_task() {
        let event = TaskEvent::new(TaskEventKind::Assigned, &sample_task(), 3);

        assert_eq!(event.task_id, 55);
        assert_eq!(event.project_id, 101);
        assert_eq!(event.task_title, "Fix login bug");
        assert_eq!(event.assignee_id, Some(7));
        assert_eq!(event.actor_user_id, 3);
    }

    #[test]
    fn kinds_serialize_as_dotted_names() {
        let event = TaskEvent::new(TaskEventKind::Reassigned, &sample_task(), 3);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["kind"], "task.reassigned");
        assert_eq!(json["taskId"], 55);
        assert_eq!(TaskEventKind::Deleted.to_string(), "task.deleted");
    }

    #[tokio::test]
    async fn every_subscriber_receives_each_event() {
        let bus = EventBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(TaskEvent::new(TaskEventKind::Deleted, &sample_task(), 1));

        assert_eq!(first.recv().await.unwrap().kind, TaskEventKind::Deleted);
        assert_eq!(second.recv().await.unwrap().kind, TaskEventKind::Deleted);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        EventBus::default().publish(TaskEvent::new(TaskEventKind::Created, &sample_task(), 1));
    }

    #[tokio::test]
    async fn dropping_the_bus_closes_subscriptions() {
        let bus = EventBus::default();
        let mut receiver = bus.subscribe();
        drop(bus);

        assert!(matches!(
            receiver.recv().await,
            Err(broadcast::error::RecvError::Closed)
        ));
    }
}
