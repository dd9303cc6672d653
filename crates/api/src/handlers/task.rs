//! Handlers for the `/tasks` resource.
//!
//! Any authenticated user may operate on tasks. Assignment changes emit
//! domain events that produce notifications for the new assignee.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use taskboard_core::error::CoreError;
use taskboard_core::task::{
    parse_assignee, validate_title, AssigneeUpdate, AssignmentChange, TaskPriority, TaskStatus,
};
use taskboard_core::types::DbId;
use taskboard_db::models::task::{CreateTask, Task, TaskPatch, TaskWithAssignee};
use taskboard_db::repositories::{ProjectRepo, TaskRepo, UserRepo};
use taskboard_events::{TaskEvent, TaskEventKind};

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::query::deserialize_some;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /tasks`.
///
/// `assigneeId` accepts `null`, `""`, a number, or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<DbId>,
    #[serde(default)]
    pub assignee_id: Option<serde_json::Value>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Request body for `PUT /tasks/{id}`. Every field is optional; unknown
/// fields are ignored.
///
/// For `description` and `assigneeId`, an explicit `null` clears the value
/// while an absent field leaves it unchanged.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub assignee_id: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/tasks/{project_id}
///
/// Non-deleted tasks of a project, newest first, with assignee names.
pub async fn list_tasks(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<TaskWithAssignee>>>> {
    let tasks = TaskRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/v1/tasks/{id}/detail
pub async fn get_task(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TaskWithAssignee>>> {
    let task = load_detail(&state, id).await?;
    Ok(Json(DataResponse { data: task }))
}

/// POST /api/v1/tasks
///
/// Create a task. Nothing is written when any input is invalid. A task
/// created with an assignee notifies that assignee.
pub async fn create_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<TaskWithAssignee>>)> {
    let title = validate_title(input.title.as_deref().unwrap_or_default())?;
    let project_id = input
        .project_id
        .ok_or_else(|| CoreError::Validation("projectId is required".into()))?;
    let status = input
        .status
        .as_deref()
        .map(TaskStatus::parse)
        .transpose()?
        .unwrap_or_default();
    let priority = input
        .priority
        .as_deref()
        .map(TaskPriority::parse)
        .transpose()?
        .unwrap_or_default();
    let assignee_id =
        parse_assignee(input.assignee_id.as_ref().unwrap_or(&serde_json::Value::Null))?;

    if !ProjectRepo::exists(&state.pool, project_id).await? {
        return Err(AppError::not_found("Project", project_id));
    }
    if let Some(assignee_id) = assignee_id {
        ensure_user_exists(&state, assignee_id).await?;
    }

    let task = TaskRepo::create(
        &state.pool,
        &CreateTask {
            project_id,
            title,
            description: normalize_description(input.description),
            status,
            priority,
            assignee_id,
        },
    )
    .await?;
    tracing::info!(task_id = task.id, project_id, user_id = auth.user_id, "Task created");

    state
        .emit(TaskEvent::new(TaskEventKind::Created, &task, auth.user_id))
        .await;
    if AssignmentChange::on_create(task.assignee_id).is_some() {
        state
            .emit(TaskEvent::new(TaskEventKind::Assigned, &task, auth.user_id))
            .await;
    }

    let detail = load_detail(&state, task.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// PUT /api/v1/tasks/{id}
///
/// Apply a partial update. Moving the task to a different, non-empty
/// assignee notifies the new assignee.
pub async fn update_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTaskRequest>,
) -> AppResult<Json<DataResponse<TaskWithAssignee>>> {
    let current = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", id))?;

    let patch = build_patch(input)?;
    if let Some(assignee_id) = patch.assignee.target() {
        ensure_user_exists(&state, assignee_id).await?;
    }

    let updated = TaskRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("Task", id))?;
    tracing::info!(task_id = id, user_id = auth.user_id, "Task updated");

    state
        .emit(TaskEvent::new(TaskEventKind::Updated, &updated, auth.user_id))
        .await;
    if reassignment(&patch, &current, &updated).is_some() {
        state
            .emit(TaskEvent::new(TaskEventKind::Reassigned, &updated, auth.user_id))
            .await;
    }

    let detail = load_detail(&state, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/tasks/{id}
///
/// Move a task to the trash. Deleting a trashed task is a no-op.
pub async fn delete_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let task = TaskRepo::find_including_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", id))?;

    if !task.is_deleted() && TaskRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(task_id = id, user_id = auth.user_id, "Task moved to trash");
        state
            .emit(TaskEvent::new(TaskEventKind::Deleted, &task, auth.user_id))
            .await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/tasks/{id}/restore
///
/// Bring a task back from the trash. Restoring an active task is a no-op.
pub async fn restore_task(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TaskWithAssignee>>> {
    let task = TaskRepo::find_including_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", id))?;

    if task.is_deleted() && TaskRepo::restore(&state.pool, id).await? {
        tracing::info!(task_id = id, user_id = auth.user_id, "Task restored");
        state
            .emit(TaskEvent::new(TaskEventKind::Restored, &task, auth.user_id))
            .await;
    }

    let detail = load_detail(&state, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_detail(state: &AppState, id: DbId) -> AppResult<TaskWithAssignee> {
    TaskRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task", id))
}

async fn ensure_user_exists(state: &AppState, user_id: DbId) -> AppResult<()> {
    if UserRepo::exists(&state.pool, user_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "Assignee {user_id} does not exist"
        ))))
    }
}

/// Trim a description; blank means none.
fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Validate an update request into a [`TaskPatch`].
fn build_patch(input: UpdateTaskRequest) -> Result<TaskPatch, CoreError> {
    Ok(TaskPatch {
        title: input.title.as_deref().map(validate_title).transpose()?,
        description: input.description.map(normalize_description),
        status: input.status.as_deref().map(TaskStatus::parse).transpose()?,
        priority: input
            .priority
            .as_deref()
            .map(TaskPriority::parse)
            .transpose()?,
        assignee: AssigneeUpdate::from_field(input.assignee_id.as_ref())?,
    })
}

/// The reassignment an update performed, if any.
fn reassignment(patch: &TaskPatch, before: &Task, after: &Task) -> Option<AssignmentChange> {
    if patch.assignee == AssigneeUpdate::Unchanged {
        return None;
    }
    AssignmentChange::on_update(before.assignee_id, after.assignee_id)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn parse(body: serde_json::Value) -> UpdateTaskRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn empty_body_builds_an_empty_patch() {
        let patch = build_patch(parse(json!({}))).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let patch = build_patch(parse(json!({"colour": "red", "status": "Done"}))).unwrap();
        assert_eq!(patch.status, Some(TaskStatus::Done));
    }

    #[test]
    fn null_assignee_clears_and_absent_keeps() {
        let cleared = build_patch(parse(json!({"assigneeId": null}))).unwrap();
        assert_eq!(cleared.assignee, AssigneeUpdate::Set(None));

        let blank = build_patch(parse(json!({"assigneeId": ""}))).unwrap();
        assert_eq!(blank.assignee, AssigneeUpdate::Set(None));

        let kept = build_patch(parse(json!({"title": "x"}))).unwrap();
        assert_eq!(kept.assignee, AssigneeUpdate::Unchanged);
    }

    #[test]
    fn invalid_values_are_validation_errors() {
        assert_matches!(
            build_patch(parse(json!({"status": "Blocked"}))),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            build_patch(parse(json!({"title": "  "}))),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            build_patch(parse(json!({"assigneeId": "seven"}))),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn blank_description_is_cleared() {
        let patch = build_patch(parse(json!({"description": "   "}))).unwrap();
        assert_eq!(patch.description, Some(None));
    }
}
