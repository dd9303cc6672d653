//! Route definitions for the `/projects` resource.
//!
//! All endpoints require authentication; reads require membership.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{member, project, report};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                          -> list_projects
/// POST   /                          -> create_project
/// GET    /{id}                      -> get_project
/// PUT    /{id}                      -> update_project (owner)
/// DELETE /{id}                      -> delete_project (owner)
/// GET    /{id}/members              -> list_members
/// POST   /{id}/members              -> add_member (owner or team leader)
/// DELETE /{id}/members/{user_id}    -> remove_member (owner or team leader)
/// GET    /{id}/trash                -> list_trash
/// GET    /{id}/stats                -> project_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(project::list_projects).post(project::create_project),
        )
        .route(
            "/{id}",
            get(project::get_project)
                .put(project::update_project)
                .delete(project::delete_project),
        )
        .route(
            "/{id}/members",
            get(member::list_members).post(member::add_member),
        )
        .route("/{id}/members/{user_id}", delete(member::remove_member))
        .route("/{id}/trash", get(project::list_trash))
        .route("/{id}/stats", get(report::project_stats))
}
