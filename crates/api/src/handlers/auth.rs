//! Handlers for the `/auth` resource (register, login, refresh, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use taskboard_core::error::CoreError;
use taskboard_core::identity::{normalize_email, validate_display_name, validate_email};
use taskboard_core::types::DbId;
use taskboard_db::models::session::CreateSession;
use taskboard_db::models::user::{CreateUser, User, UserResponse};
use taskboard_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{hash_refresh_token, issue_tokens};
use crate::auth::password::{hash_password, verify_password, PasswordPolicy};
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Shared message for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

const INVALID_REFRESH_TOKEN: &str = "Invalid or expired refresh token";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by register, login and refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and sign it in. Returns 201 with tokens.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let name = validate_display_name(&input.name)?;
    let email = validate_email(&input.email)?;
    PasswordPolicy {
        min_length: state.config.password_min_length,
    }
    .check(&input.password)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name,
            email,
            password_hash,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "User registered");

    let response = sign_in(&state, user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &normalize_email(&input.email))
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(sign_in(&state, user).await?))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new token pair. The presented token is
/// retired, so each refresh token works once.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let rejected = || AppError::Core(CoreError::Unauthorized(INVALID_REFRESH_TOKEN.into()));

    let session = SessionRepo::find_active(&state.pool, &hash_refresh_token(&input.refresh_token))
        .await?
        .ok_or_else(rejected)?;
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(rejected)?;

    let response = create_auth_response(&state, user, Some(session.id))
        .await?
        .ok_or_else(rejected)?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(DataResponse { data: user.into() }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Start a new session for `user`.
async fn sign_in(state: &AppState, user: User) -> AppResult<AuthResponse> {
    create_auth_response(state, user, None)
        .await?
        .ok_or_else(|| AppError::InternalError("New session was not created".into()))
}

/// Issue tokens and persist their session, either fresh or replacing
/// `rotating`. `None` when `rotating` has already been used.
async fn create_auth_response(
    state: &AppState,
    user: User,
    rotating: Option<DbId>,
) -> AppResult<Option<AuthResponse>> {
    let jwt = &state.config.jwt;
    let tokens = issue_tokens(user.id, &user.email, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let session = CreateSession {
        user_id: user.id,
        refresh_token_hash: tokens.refresh_token_hash,
        expires_at: tokens.refresh_expires_at,
    };
    match rotating {
        Some(previous) => {
            if SessionRepo::rotate(&state.pool, previous, &session).await?.is_none() {
                tracing::warn!(user_id = user.id, session_id = previous, "Refresh token reused");
                return Ok(None);
            }
        }
        None => {
            SessionRepo::create(&state.pool, &session).await?;
        }
    }

    Ok(Some(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: jwt.access_ttl_secs(),
        user: user.into(),
    }))
}
