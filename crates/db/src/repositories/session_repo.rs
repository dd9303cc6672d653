//! Refresh-token sessions.
//!
//! A session is exchanged at most once: [`SessionRepo::rotate`] retires it
//! and opens its successor in one transaction.

use chrono::Utc;
use sqlx::SqliteConnection;
use taskboard_core::types::DbId;

use crate::models::session::{CreateSession, UserSession};
use crate::DbPool;

const COLUMNS: &str =
    "id, user_id, refresh_token_hash, expires_at, is_revoked, created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Open a session for a freshly signed-in user.
    pub async fn create(pool: &DbPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        insert(&mut conn, input).await
    }

    /// The session a refresh token belongs to, if it can still be used.
    pub async fn find_active(
        pool: &DbPool,
        refresh_token_hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_sessions WHERE refresh_token_hash = $1");
        let session = sqlx::query_as::<_, UserSession>(&query)
            .bind(refresh_token_hash)
            .fetch_optional(pool)
            .await?;
        Ok(session.filter(|s| s.is_active(Utc::now())))
    }

    /// Revoke session `previous_id` and open `next` in its place.
    ///
    /// Returns `None`, writing nothing, when `previous_id` was already
    /// revoked, e.g. by a concurrent exchange of the same token.
    pub async fn rotate(
        pool: &DbPool,
        previous_id: DbId,
        next: &CreateSession,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let revoked = sqlx::query(
            "UPDATE user_sessions SET is_revoked = 1, updated_at = $2
             WHERE id = $1 AND is_revoked = 0",
        )
        .bind(previous_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if revoked == 0 {
            return Ok(None);
        }

        let session = insert(&mut tx, next).await?;
        tx.commit().await?;
        Ok(Some(session))
    }

    /// Revoke every live session of a user (logout). Returns how many.
    pub async fn revoke_all_for_user(pool: &DbPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        sqlx::query(
            "UPDATE user_sessions SET is_revoked = 1, updated_at = $2
             WHERE user_id = $1 AND is_revoked = 0",
        )
        .bind(user_id)
        .bind(Utc::now())
        .execute(pool)
        .await
        .map(|r| r.rows_affected())
    }
}

async fn insert(conn: &mut SqliteConnection, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
    let query = format!(
        "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $4)
         RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, UserSession>(&query)
        .bind(input.user_id)
        .bind(&input.refresh_token_hash)
        .bind(input.expires_at)
        .bind(Utc::now())
        .fetch_one(conn)
        .await
}
