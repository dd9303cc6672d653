//! Repository for the `projects` table.

use chrono::Utc;
use taskboard_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::repositories::membership_repo::insert_if_absent;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, owner_id, team_leader_id, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project together with its owner membership and, when a team
    /// leader is given, the team leader's membership. All writes share one
    /// transaction.
    pub async fn create_with_owner(
        pool: &DbPool,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (name, description, owner_id, team_leader_id, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.owner_id)
            .bind(input.team_leader_id)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        insert_if_absent(&mut tx, project.id, input.owner_id, now).await?;
        if let Some(leader_id) = input.team_leader_id {
            insert_if_absent(&mut tx, project.id, leader_id, now).await?;
        }

        tx.commit().await?;
        Ok(project)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the projects a user is a member of, most recently created first.
    pub async fn list_for_member(pool: &DbPool, user_id: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE id IN (SELECT project_id FROM project_members WHERE user_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only supplied fields in `input` are applied.
    ///
    /// A newly set team leader receives a membership if absent. Returns
    /// `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                team_leader_id = CASE WHEN $5 THEN $6 ELSE team_leader_id END,
                updated_at = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(input.team_leader_id.is_some())
            .bind(input.team_leader_id.flatten())
            .bind(now)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = project else {
            return Ok(None);
        };

        if let Some(Some(leader_id)) = input.team_leader_id {
            insert_if_absent(&mut tx, project.id, leader_id, now).await?;
        }

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Permanently delete a project. Tasks, memberships, comments and
    /// activity go with it. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
