//! Task events and what reacts to them.
//!
//! The request that changes a task builds a [`TaskEvent`], hands it to the
//! [`NotificationDispatcher`] in-request, then publishes it on the
//! [`EventBus`] where the [`ActivityRecorder`] picks it up in the
//! background.

pub mod activity;
pub mod bus;
pub mod dispatcher;

pub use activity::ActivityRecorder;
pub use bus::{EventBus, TaskEvent, TaskEventKind};
pub use dispatcher::{DispatchError, NotificationDispatcher};
