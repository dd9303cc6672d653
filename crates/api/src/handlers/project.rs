//! Handlers for the `/projects` resource.
//!
//! Reads require membership. Updates and deletion are reserved for the
//! project owner.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use taskboard_core::error::CoreError;
use taskboard_core::membership::{validate_project_name, ProjectAuthority};
use taskboard_core::types::DbId;
use taskboard_db::models::project::{CreateProject, Project, UpdateProject};
use taskboard_db::models::task::TaskWithAssignee;
use taskboard_db::repositories::{MembershipRepo, ProjectRepo, TaskRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::query::deserialize_some;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /projects`. The acting user becomes the owner.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub team_leader_id: Option<DbId>,
}

/// Request body for `PUT /projects/{id}`.
///
/// An explicit `null` clears `description` / `teamLeaderId`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub team_leader_id: Option<Option<DbId>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects
///
/// Projects the authenticated user is a member of.
pub async fn list_projects(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_for_member(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/v1/projects
///
/// Create a project owned by the acting user. The owner and the team
/// leader (if any) become members in the same transaction.
pub async fn create_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let name = validate_project_name(&input.name)?;
    if let Some(leader_id) = input.team_leader_id {
        ensure_team_leader_exists(&state, leader_id).await?;
    }

    let project = ProjectRepo::create_with_owner(
        &state.pool,
        &CreateProject {
            name,
            description: trimmed(input.description),
            owner_id: auth.user_id,
            team_leader_id: input.team_leader_id,
        },
    )
    .await?;
    tracing::info!(project_id = project.id, user_id = auth.user_id, "Project created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = load_member_project(&state, id, auth.user_id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
///
/// Owner-only partial update. A newly set team leader becomes a member.
pub async fn update_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = load_project(&state, id).await?;
    authority(&project).ensure_owner(auth.user_id)?;

    let name = input
        .name
        .as_deref()
        .map(validate_project_name)
        .transpose()?;
    if let Some(Some(leader_id)) = input.team_leader_id {
        ensure_team_leader_exists(&state, leader_id).await?;
    }

    let updated = ProjectRepo::update(
        &state.pool,
        id,
        &UpdateProject {
            name,
            description: input.description.map(trimmed),
            team_leader_id: input.team_leader_id,
        },
    )
    .await?
    .ok_or_else(|| AppError::not_found("Project", id))?;
    tracing::info!(project_id = id, user_id = auth.user_id, "Project updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/projects/{id}
///
/// Owner-only hard delete. Tasks, memberships, comments and activity are
/// removed with the project.
pub async fn delete_project(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = load_project(&state, id).await?;
    authority(&project).ensure_owner(auth.user_id)?;

    ProjectRepo::delete(&state.pool, id).await?;
    tracing::info!(project_id = id, user_id = auth.user_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/{id}/trash
///
/// Soft-deleted tasks of a project, most recently deleted first.
pub async fn list_trash(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TaskWithAssignee>>>> {
    load_member_project(&state, id, auth.user_id).await?;
    let tasks = TaskRepo::list_trash(&state.pool, id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a project or fail with 404.
pub(crate) async fn load_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))
}

/// Load a project the user belongs to: 404 if absent, 403 for non-members.
pub(crate) async fn load_member_project(
    state: &AppState,
    id: DbId,
    user_id: DbId,
) -> AppResult<Project> {
    let project = load_project(state, id).await?;
    if !MembershipRepo::is_member(&state.pool, id, user_id).await? {
        return Err(AppError::Core(CoreError::Forbidden(
            "You are not a member of this project".into(),
        )));
    }
    Ok(project)
}

pub(crate) fn authority(project: &Project) -> ProjectAuthority {
    ProjectAuthority::new(project.owner_id, project.team_leader_id)
}

async fn ensure_team_leader_exists(state: &AppState, user_id: DbId) -> AppResult<()> {
    if UserRepo::exists(&state.pool, user_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Team leader {user_id} does not exist"
        ))))
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
