//! Handlers for task comments and the task activity log.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use taskboard_core::activity::{describe, validate_comment_content, KIND_COMMENT};
use taskboard_core::types::DbId;
use taskboard_db::models::activity::ActivityWithUser;
use taskboard_db::models::comment::CommentWithAuthor;
use taskboard_db::repositories::{ActivityRepo, CommentRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /tasks/{id}/comments`.
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    #[serde(default)]
    pub content: String,
}

/// GET /api/v1/tasks/{id}/comments
///
/// Comments on a task, newest first.
pub async fn list_comments(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CommentWithAuthor>>>> {
    ensure_task_exists(&state, task_id).await?;
    let comments = CommentRepo::list_for_task(&state.pool, task_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /api/v1/tasks/{id}/comments
///
/// Add a comment to a live task. The comment and its `comment` activity
/// entry are written together.
pub async fn add_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Json(input): Json<AddCommentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CommentWithAuthor>>)> {
    let task = TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", task_id))?;
    let content = validate_comment_content(&input.content)?;

    let comment = CommentRepo::create_with_activity(
        &state.pool,
        task_id,
        auth.user_id,
        &content,
        &describe(KIND_COMMENT, &task.title),
    )
    .await?;
    tracing::info!(comment_id = comment.id, task_id, user_id = auth.user_id, "Comment added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /api/v1/tasks/{id}/activities
///
/// Activity entries of a task, newest first.
pub async fn list_activities(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ActivityWithUser>>>> {
    ensure_task_exists(&state, task_id).await?;
    let activity = ActivityRepo::list_for_task(&state.pool, task_id).await?;
    Ok(Json(DataResponse { data: activity }))
}

/// 404 unless a task row exists, trashed or not.
async fn ensure_task_exists(state: &AppState, task_id: DbId) -> AppResult<()> {
    TaskRepo::find_including_deleted(&state.pool, task_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found("Task", task_id))
}
