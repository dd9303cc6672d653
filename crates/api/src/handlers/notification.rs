//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and act on the
//! caller's own notifications.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use taskboard_core::error::CoreError;
use taskboard_core::notification::{clamp_limit, clamp_offset};
use taskboard_core::types::DbId;
use taskboard_db::models::notification::Notification;
use taskboard_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::query::NotificationQuery;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkedRead {
    pub marked_read: u64,
}

/// GET /api/v1/notifications
///
/// List the authenticated user's notifications, newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationQuery>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.unread_only.unwrap_or(false),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;

    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { count },
    }))
}

/// POST /api/v1/notifications/read-all
///
/// Returns the number of notifications that were marked.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<MarkedRead>>> {
    let marked_read = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: MarkedRead { marked_read },
    }))
}

/// PUT /api/v1/notifications/{id}/read
///
/// Mark one of the caller's notifications as read and return it. 404 when
/// it does not exist, 403 when it belongs to someone else.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Notification>>> {
    load_own(&state, id, auth.user_id).await?;

    let notification = NotificationRepo::mark_read(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Notification", id))?;
    Ok(Json(DataResponse { data: notification }))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_own(&state, id, auth.user_id).await?;
    NotificationRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn load_own(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Notification> {
    let notification = NotificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Notification", id))?;

    if notification.user_id != user_id {
        tracing::warn!(notification_id = id, user_id, "Rejected access to another user's notification");
        return Err(AppError::Core(CoreError::Forbidden(
            "Notification belongs to another user".into(),
        )));
    }
    Ok(notification)
}
