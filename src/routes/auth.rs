use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::auth::tokens::{self, auth_cookies, clear_auth_cookies, hash_token};
use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub access_token: String,
    pub refresh_token: String,
}

/// POST /api/login. The account is resolved by exact email; a missing
/// account and a bad password both produce the same generic 400 so the
/// response does not reveal which emails are registered.
pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    if state.login_limiter.check(&req.email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let user = db::users::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid credentials".to_string()))?;

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;

    if !valid {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::BadRequest("Invalid credentials".to_string()));
    }

    let pair = tokens::issue_pair(&state, &user).await?;
    let jar = auth_cookies(&pair);
    Ok((
        jar,
        Json(AuthResponse {
            success: true,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }),
    ))
}

/// POST /api/logout. Idempotent: revokes the presented refresh token when
/// there is one, succeeds either way.
pub async fn logout(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<serde_json::Value>), AppError> {
    if let Some(cookie) = jar.get("refresh_token") {
        db::refresh_tokens::delete_by_hash(&state.pool, &hash_token(cookie.value())).await?;
    }

    Ok((clear_auth_cookies(), Json(json!({ "success": true }))))
}

/// GET /api/user — who-am-i introspection for an authenticated caller.
pub async fn who_am_i(auth: AuthUser) -> Json<serde_json::Value> {
    Json(json!({
        "isAuthenticated": true,
        "username": auth.username,
    }))
}

/// POST /api/token/refresh. Accepts the refresh token from the cookie or a
/// JSON body; rotates it into a new pair. Reusing an already-rotated token
/// revokes every session of that user.
pub async fn refresh(
    State(state): State<SharedState>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let refresh_value = jar
        .get("refresh_token")
        .map(|c| c.value().to_string())
        .or_else(|| body.map(|Json(req)| req.refresh_token))
        .ok_or_else(|| AppError::Unauthorized("Missing refresh token".to_string()))?;

    let stored = db::refresh_tokens::find_by_hash(&state.pool, &hash_token(&refresh_value))
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    if stored.used {
        tracing::warn!(
            "Refresh token reuse detected for user {}. Revoking all sessions.",
            stored.user_id
        );
        db::refresh_tokens::delete_all_for_user(&state.pool, stored.user_id).await?;
        return Err(AppError::Unauthorized(
            "Refresh token reuse detected. All sessions revoked.".to_string(),
        ));
    }

    if stored.expires_at < Utc::now() {
        return Err(AppError::Unauthorized("Refresh token expired".to_string()));
    }

    db::refresh_tokens::mark_used(&state.pool, stored.id).await?;

    let user = db::users::find_by_id(&state.pool, stored.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let pair = tokens::issue_pair(&state, &user).await?;
    let jar = auth_cookies(&pair);
    Ok((
        jar,
        Json(AuthResponse {
            success: true,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }),
    ))
}
