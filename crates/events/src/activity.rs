//! Background activity recording for task lifecycle events.
//!
//! [`ActivityRecorder`] drains an [`EventBus`](crate::bus::EventBus)
//! subscription and appends one activity entry per event. Entries appear
//! shortly after the request that caused them, not within it.

use taskboard_core::activity::{
    describe, KIND_ASSIGNED, KIND_CREATED, KIND_DELETED, KIND_RESTORED, KIND_UPDATED,
};
use taskboard_db::models::activity::{ActivityLog, CreateActivity};
use taskboard_db::repositories::ActivityRepo;
use taskboard_db::DbPool;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;

use crate::bus::{TaskEvent, TaskEventKind};

pub struct ActivityRecorder;

impl ActivityRecorder {
    /// Record events until the bus is dropped.
    pub async fn run(pool: DbPool, mut receiver: Receiver<TaskEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::record(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            kind = %event.kind,
                            task_id = event.task_id,
                            "Failed to record task activity"
                        );
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Activity recorder lagged; events were lost");
                }
                Err(RecvError::Closed) => {
                    tracing::info!("Event bus closed, activity recorder stopping");
                    break;
                }
            }
        }
    }

    /// Append the activity entry for one event.
    pub async fn record(pool: &DbPool, event: &TaskEvent) -> Result<ActivityLog, sqlx::Error> {
        let kind = activity_kind(event.kind);
        ActivityRepo::create(
            pool,
            &CreateActivity {
                task_id: event.task_id,
                user_id: event.actor_user_id,
                kind: kind.to_string(),
                description: describe(kind, &event.task_title),
            },
        )
        .await
    }
}

/// Assignment and reassignment share the `assigned` kind.
fn activity_kind(kind: TaskEventKind) -> &'static str {
    match kind {
        TaskEventKind::Created => KIND_CREATED,
        TaskEventKind::Updated => KIND_UPDATED,
        TaskEventKind::Assigned | TaskEventKind::Reassigned => KIND_ASSIGNED,
        TaskEventKind::Deleted => KIND_DELETED,
        TaskEventKind::Restored => KIND_RESTORED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_events_map_to_activity_kinds() {
        assert_eq!(activity_kind(TaskEventKind::Created), "created");
        assert_eq!(activity_kind(TaskEventKind::Reassigned), "assigned");
        assert_eq!(activity_kind(TaskEventKind::Assigned), "assigned");
        assert_eq!(activity_kind(TaskEventKind::Restored), "restored");
    }
}
