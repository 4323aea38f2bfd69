use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::jwt;
use crate::error::AppError;
use crate::state::SharedState;

/// The authenticated caller, resolved from a Bearer header or the
/// access_token cookie.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // Try Bearer token from Authorization header first
        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                let claims = jwt::decode_token(token, &state.config.jwt_secret)
                    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

                return Ok(AuthUser {
                    user_id: claims.sub,
                    username: claims.username,
                });
            }
        }

        // Fall back to cookie-based auth
        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get("access_token") {
            let claims = jwt::decode_token(cookie.value(), &state.config.jwt_secret)
                .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

            return Ok(AuthUser {
                user_id: claims.sub,
                username: claims.username,
            });
        }

        Err(AppError::Unauthorized(
            "Missing authentication token".to_string(),
        ))
    }
}
