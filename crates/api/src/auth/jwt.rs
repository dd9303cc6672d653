//! Access and refresh tokens.
//!
//! Access tokens are HS256 JWTs carrying [`Claims`]. Refresh tokens are
//! opaque random strings handed to the client once; the server keeps only
//! their SHA-256 digest in `user_sessions`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use taskboard_core::types::DbId;
use uuid::Uuid;

/// Default access token lifetime in minutes.
pub const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;
/// Default refresh token lifetime in days.
pub const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Payload of an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: DbId,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_ACCESS_EXPIRY_MINS` and `JWT_REFRESH_EXPIRY_DAYS`.
    ///
    /// # Panics
    ///
    /// Panics if the secret is missing or blank, or a lifetime is not an
    /// integer.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .expect("JWT_SECRET must be set to a non-empty value");

        let lifetime = |var: &str, default: i64| -> i64 {
            std::env::var(var)
                .map(|v| {
                    v.parse()
                        .unwrap_or_else(|_| panic!("{var} must be an integer, got '{v}'"))
                })
                .unwrap_or(default)
        };

        Self {
            secret,
            access_token_expiry_mins: lifetime("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS),
            refresh_token_expiry_days: lifetime(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            ),
        }
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_token_expiry_mins * 60
    }
}

/// Everything produced when a user signs in.
#[derive(Debug)]
pub struct IssuedTokens {
    pub access_token: String,
    /// Plaintext refresh token for the client.
    pub refresh_token: String,
    /// Digest to persist in place of the refresh token.
    pub refresh_token_hash: String,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Issue a fresh access token and refresh token for a user.
pub fn issue_tokens(
    user_id: DbId,
    email: &str,
    config: &JwtConfig,
) -> Result<IssuedTokens, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let access_token = generate_access_token(user_id, email, now, config)?;
    let refresh_token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());

    Ok(IssuedTokens {
        access_token,
        refresh_token_hash: hash_refresh_token(&refresh_token),
        refresh_token,
        refresh_expires_at: now + Duration::days(config.refresh_token_expiry_days),
    })
}

fn generate_access_token(
    user_id: DbId,
    email: &str,
    issued_at: DateTime<Utc>,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = issued_at.timestamp();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp: iat + config.access_ttl_secs(),
        iat,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature and expiry of an access token and return its claims.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    // `sub` is numeric, so it is checked by deserializing `Claims`, not
    // listed as a required spec claim (those must be strings).
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

/// Hex SHA-256 of a refresh token.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
