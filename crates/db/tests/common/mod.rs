//! Shared fixtures for repository integration tests.

#![allow(dead_code)]

use taskboard_db::models::project::{CreateProject, Project};
use taskboard_db::models::user::{CreateUser, User};
use taskboard_db::repositories::{ProjectRepo, UserRepo};
use taskboard_db::{create_pool, run_migrations, DbPool, IN_MEMORY_URL};

/// Fresh in-memory database with all migrations applied.
pub async fn test_pool() -> DbPool {
    let pool = create_pool(IN_MEMORY_URL, 1).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

pub async fn seed_user(pool: &DbPool, name: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_project(pool: &DbPool, owner_id: i64, team_leader_id: Option<i64>) -> Project {
    ProjectRepo::create_with_owner(
        pool,
        &CreateProject {
            name: "Website".to_string(),
            description: None,
            owner_id,
            team_leader_id,
        },
    )
    .await
    .unwrap()
}
