//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&DbPool` as the first argument.

pub mod activity_repo;
pub mod comment_repo;
pub mod membership_repo;
pub mod notification_repo;
pub mod project_repo;
pub mod session_repo;
pub mod task_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use comment_repo::CommentRepo;
pub use membership_repo::MembershipRepo;
pub use notification_repo::NotificationRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
