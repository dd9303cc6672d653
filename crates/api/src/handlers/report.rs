//! Project reporting.

use axum::extract::State;
use taskboard_core::report::ProjectStats;
use taskboard_core::types::DbId;
use taskboard_db::repositories::TaskRepo;

use crate::error::AppResult;
use crate::extract::{Json, Path};
use crate::handlers::project::load_member_project;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/stats
///
/// Counts of live tasks by status and priority, unassigned count, and
/// completion percentage.
pub async fn project_stats(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectStats>>> {
    load_member_project(&state, project_id, auth.user_id).await?;
    let counts = TaskRepo::counts(&state.pool, project_id).await?;
    let stats = ProjectStats::from_counts(&counts.by_status, &counts.by_priority, counts.unassigned);
    Ok(Json(DataResponse { data: stats }))
}
