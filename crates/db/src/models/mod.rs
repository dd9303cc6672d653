//! Row models and write DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Joined read models used by list endpoints
//! - Create/patch DTOs for inserts and partial updates

pub mod activity;
pub mod comment;
pub mod membership;
pub mod notification;
pub mod project;
pub mod session;
pub mod task;
pub mod user;
