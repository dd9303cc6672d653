//! Assignment notifications.
//!
//! [`NotificationDispatcher`] turns `task.assigned` and `task.reassigned`
//! events into exactly one notification for the new assignee. The request
//! that changed the assignment calls it after its write has committed, and
//! its failures never reach that request's caller.

use taskboard_core::notification::AssignmentMessage;
use taskboard_core::task::AssignmentChange;
use taskboard_core::types::DbId;
use taskboard_db::models::notification::{CreateNotification, Notification};
use taskboard_db::repositories::{NotificationRepo, UserRepo};
use taskboard_db::DbPool;

use crate::bus::{TaskEvent, TaskEventKind};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{0} event has no assignee to notify")]
    MissingRecipient(TaskEventKind),

    #[error("recipient user {0} does not exist")]
    UnknownRecipient(DbId),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    pool: DbPool,
}

impl NotificationDispatcher {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Like [`try_dispatch`](Self::try_dispatch), but failures are logged
    /// at `warn` and dropped.
    pub async fn dispatch(&self, event: &TaskEvent) -> Option<Notification> {
        self.try_dispatch(event).await.unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                kind = %event.kind,
                task_id = event.task_id,
                "Failed to dispatch assignment notification"
            );
            None
        })
    }

    /// Write the notification an event calls for. Non-assignment events
    /// yield `Ok(None)`.
    pub async fn try_dispatch(&self, event: &TaskEvent) -> Result<Option<Notification>, DispatchError> {
        let to_change: fn(DbId) -> AssignmentChange = match event.kind {
            TaskEventKind::Assigned => AssignmentChange::Assigned,
            TaskEventKind::Reassigned => AssignmentChange::Reassigned,
            _ => return Ok(None),
        };
        let recipient = event
            .assignee_id
            .ok_or(DispatchError::MissingRecipient(event.kind))?;
        if !UserRepo::exists(&self.pool, recipient).await? {
            return Err(DispatchError::UnknownRecipient(recipient));
        }

        let message = AssignmentMessage::render(
            to_change(recipient),
            event.task_id,
            &event.task_title,
            event.project_id,
        );
        let notification = NotificationRepo::create(
            &self.pool,
            &CreateNotification {
                user_id: recipient,
                kind: message.kind.to_string(),
                title: message.title,
                message: message.message,
                link: Some(message.link),
            },
        )
        .await?;

        tracing::info!(
            notification_id = notification.id,
            user_id = recipient,
            task_id = event.task_id,
            kind = %notification.kind,
            "Assignment notification dispatched"
        );
        Ok(Some(notification))
    }
}
