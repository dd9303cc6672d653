//! Route definitions for the `/tasks` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{comment, task};
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// `GET /{id}` takes a project id; every other `{id}` is a task id.
///
/// ```text
/// POST   /                 -> create_task
/// GET    /{id}             -> list_tasks (by project)
/// PUT    /{id}             -> update_task
/// DELETE /{id}             -> delete_task (soft)
/// GET    /{id}/detail      -> get_task
/// POST   /{id}/restore     -> restore_task
/// GET    /{id}/comments    -> list_comments
/// POST   /{id}/comments    -> add_comment
/// GET    /{id}/activities  -> list_activities
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(task::create_task))
        .route(
            "/{id}",
            get(task::list_tasks)
                .put(task::update_task)
                .delete(task::delete_task),
        )
        .route("/{id}/detail", get(task::get_task))
        .route("/{id}/restore", post(task::restore_task))
        .route(
            "/{id}/comments",
            get(comment::list_comments).post(comment::add_comment),
        )
        .route("/{id}/activities", get(comment::list_activities))
}
