//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /  -> list_users
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(user::list_users))
}
