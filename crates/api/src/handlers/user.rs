//! Handlers for the `/users` resource.

use axum::extract::State;
use taskboard_db::models::user::UserSummary;
use taskboard_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users
///
/// List every user (id, name, email) for assignee and member pickers.
pub async fn list_users(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserSummary>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}
