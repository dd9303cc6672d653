pub mod auth;
pub mod comment;
pub mod member;
pub mod notification;
pub mod project;
pub mod report;
pub mod task;
pub mod user;
