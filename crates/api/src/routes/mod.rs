pub mod auth;
pub mod health;
pub mod notification;
pub mod project;
pub mod task;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout
/// /auth/me                                         current user
///
/// /users                                           list users
///
/// /tasks                                           create
/// /tasks/{project_id}                              list project tasks (GET)
/// /tasks/{id}                                      update (PUT), soft delete (DELETE)
/// /tasks/{id}/detail                               get
/// /tasks/{id}/restore                              restore from trash (POST)
/// /tasks/{id}/comments                             list, add
/// /tasks/{id}/activities                           activity log
///
/// /projects                                        list mine, create
/// /projects/{id}                                   get, update, delete (owner)
/// /projects/{id}/members                           list, add
/// /projects/{id}/members/{user_id}                 remove
/// /projects/{id}/trash                             soft-deleted tasks
/// /projects/{id}/stats                             task statistics
///
/// /notifications                                   list
/// /notifications/unread-count                      unread count
/// /notifications/read-all                          mark all read (POST)
/// /notifications/{id}/read                         mark read (PUT)
/// /notifications/{id}                              delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", user::router())
        .nest("/tasks", task::router())
        .nest("/projects", project::router())
        .nest("/notifications", notification::router())
}
