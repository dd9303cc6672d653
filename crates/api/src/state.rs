use std::sync::Arc;

use taskboard_events::{EventBus, NotificationDispatcher, TaskEvent};

use crate::config::ServerConfig;

/// Handler state. Cloned per request, so everything here is a handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: taskboard_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Task events for background subscribers such as the activity recorder.
    pub event_bus: Arc<EventBus>,
    /// Writes assignment notifications in-request.
    pub dispatcher: NotificationDispatcher,
}

impl AppState {
    pub fn new(pool: taskboard_db::DbPool, config: ServerConfig, event_bus: Arc<EventBus>) -> Self {
        Self {
            dispatcher: NotificationDispatcher::new(pool.clone()),
            pool,
            config: Arc::new(config),
            event_bus,
        }
    }

    /// Emit a domain event after its write has committed.
    ///
    /// The notification dispatcher handles the event first, in-request, and
    /// never fails the caller. The event is then published on the bus for
    /// background subscribers.
    pub async fn emit(&self, event: TaskEvent) {
        self.dispatcher.dispatch(&event).await;
        self.event_bus.publish(event);
    }
}
