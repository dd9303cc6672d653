//! Domain rules for the Taskboard tracker.
//!
//! This crate has no storage or HTTP dependencies. It holds the error
//! taxonomy, the task status/priority vocabulary, membership rules,
//! notification and activity wording, and the report arithmetic shared by
//! the repository layer, the event handlers, and the API.

pub mod activity;
pub mod error;
pub mod identity;
pub mod membership;
pub mod notification;
pub mod report;
pub mod task;
pub mod types;
