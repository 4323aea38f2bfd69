use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};

use crate::auth::jwt::{Claims, encode_token};
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub fn generate_refresh_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

/// Refresh tokens are stored hashed so a database leak does not expose
/// live sessions.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Issue a fresh access + refresh token pair for a user, persisting the
/// hashed refresh token with a 7 day expiry.
pub async fn issue_pair(state: &AppState, user: &User) -> Result<TokenPair, AppError> {
    let claims = Claims::new(user.id, user.username.clone());
    let access_token =
        encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    let refresh_token = generate_refresh_token();
    db::refresh_tokens::create(
        &state.pool,
        user.id,
        &hash_token(&refresh_token),
        Utc::now() + Duration::days(7),
    )
    .await?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

pub fn auth_cookies(pair: &TokenPair) -> CookieJar {
    let access = Cookie::build(("access_token", pair.access_token.clone()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(15))
        .build();

    let refresh = Cookie::build(("refresh_token", pair.refresh_token.clone()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(7))
        .build();

    CookieJar::new().add(access).add(refresh)
}

pub fn clear_auth_cookies() -> CookieJar {
    let access = Cookie::build(("access_token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    let refresh = Cookie::build(("refresh_token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(access).add(refresh)
}
