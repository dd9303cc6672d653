//! Repository for the `project_members` table.

use chrono::Utc;
use sqlx::SqliteConnection;
use taskboard_core::types::{DbId, Timestamp};

use crate::models::membership::{MemberDetail, ProjectMember};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, created_at";

/// Provides membership operations. Adds are idempotent per (project, user).
pub struct MembershipRepo;

impl MembershipRepo {
    /// Add a member if absent and return the membership row.
    ///
    /// Adding an existing pair leaves the original row (and its timestamp)
    /// untouched.
    pub async fn add(
        pool: &DbPool,
        project_id: DbId,
        user_id: DbId,
    ) -> Result<ProjectMember, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        insert_if_absent(&mut conn, project_id, user_id, Utc::now()).await?;

        let query =
            format!("SELECT {COLUMNS} FROM project_members WHERE project_id = $1 AND user_id = $2");
        sqlx::query_as::<_, ProjectMember>(&query)
            .bind(project_id)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Remove a membership. Returns `true` if a row was deleted.
    pub async fn remove(pool: &DbPool, project_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
            .bind(project_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_member(pool: &DbPool, project_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM project_members WHERE project_id = $1 AND user_id = $2)",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// List the members of a project with their owner / team leader flags,
    /// in joining order.
    pub async fn list_members(
        pool: &DbPool,
        project_id: DbId,
    ) -> Result<Vec<MemberDetail>, sqlx::Error> {
        sqlx::query_as::<_, MemberDetail>(
            "SELECT u.id AS user_id, u.name, u.email, m.created_at AS joined_at,
                    CASE WHEN p.owner_id = u.id THEN 1 ELSE 0 END AS is_owner,
                    CASE WHEN p.team_leader_id = u.id THEN 1 ELSE 0 END AS is_team_leader
             FROM project_members m
             JOIN users u ON u.id = m.user_id
             JOIN projects p ON p.id = m.project_id
             WHERE m.project_id = $1
             ORDER BY m.created_at, m.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }
}

/// Insert a membership row unless the pair already exists.
///
/// Takes a connection so that project writes can run it inside their
/// transaction.
pub(crate) async fn insert_if_absent(
    conn: &mut SqliteConnection,
    project_id: DbId,
    user_id: DbId,
    now: Timestamp,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO project_members (project_id, user_id, created_at)
         VALUES ($1, $2, $3)
         ON CONFLICT (project_id, user_id) DO NOTHING",
    )
    .bind(project_id)
    .bind(user_id)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
