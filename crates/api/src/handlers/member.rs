//! Handlers for project membership.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use taskboard_core::error::CoreError;
use taskboard_core::types::DbId;
use taskboard_db::models::membership::{MemberDetail, ProjectMember};
use taskboard_db::repositories::{MembershipRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::handlers::project::{authority, load_member_project, load_project};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects/{id}/members`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub user_id: DbId,
}

/// GET /api/v1/projects/{id}/members
pub async fn list_members(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MemberDetail>>>> {
    load_member_project(&state, project_id, auth.user_id).await?;
    let members = MembershipRepo::list_members(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/projects/{id}/members
///
/// Idempotent: adding an existing member returns 200 with the existing row,
/// a new member 201.
pub async fn add_member(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<AddMemberRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectMember>>)> {
    let project = load_project(&state, project_id).await?;
    authority(&project).ensure_can_manage_members(auth.user_id)?;

    if !UserRepo::exists(&state.pool, input.user_id).await? {
        return Err(AppError::Core(CoreError::Validation(format!(
            "User {} does not exist",
            input.user_id
        ))));
    }

    let existed = MembershipRepo::is_member(&state.pool, project_id, input.user_id).await?;
    let member = MembershipRepo::add(&state.pool, project_id, input.user_id).await?;

    let status = if existed {
        StatusCode::OK
    } else {
        tracing::info!(
            project_id,
            member_id = input.user_id,
            user_id = auth.user_id,
            "Member added"
        );
        StatusCode::CREATED
    };
    Ok((status, Json(DataResponse { data: member })))
}

/// DELETE /api/v1/projects/{id}/members/{user_id}
///
/// Succeeds whether or not the user was a member. The owner cannot be
/// removed.
pub async fn remove_member(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, member_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let project = load_project(&state, project_id).await?;
    let authority = authority(&project);
    authority.ensure_can_manage_members(auth.user_id)?;
    authority.ensure_removable(member_id)?;

    if MembershipRepo::remove(&state.pool, project_id, member_id).await? {
        tracing::info!(project_id, member_id, user_id = auth.user_id, "Member removed");
    }
    Ok(StatusCode::NO_CONTENT)
}
