use axum::Json;
use axum::extract::{Path, State};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::password;
use crate::auth::tokens::{self, auth_cookies};
use crate::db;
use crate::error::{AppError, FieldErrors};
use crate::models::Invitation;
use crate::routes::auth::AuthResponse;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Resolve a registration token through the first three gates: syntax,
/// existence, consumption. Shared by the GET probe and the POST flow.
async fn resolve_invitation(state: &SharedState, token: &str) -> Result<Invitation, AppError> {
    // Syntax check happens before any database access.
    let token: Uuid = token
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid token format".to_string()))?;

    let invite = db::invitations::find_by_token(&state.pool, token)
        .await?
        .ok_or_else(|| AppError::NotFound("Invitation not found".to_string()))?;

    if invite.used {
        return Err(AppError::Forbidden("Invitation already used".to_string()));
    }

    Ok(invite)
}

/// GET /api/register/{token} — validity probe so a client can prefill the
/// registration form with the invited email.
pub async fn check_token(
    State(state): State<SharedState>,
    Path(token): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let invite = resolve_invitation(&state, &token).await?;
    Ok(Json(json!({ "valid": true, "email": invite.email })))
}

/// POST /api/register/{token} — invitation-gated registration. Account
/// creation and invitation consumption commit in one transaction; the new
/// account is authenticated on success.
pub async fn register(
    State(state): State<SharedState>,
    Path(token): Path<String>,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let invite = resolve_invitation(&state, &token).await?;

    validate_form(&state, &req).await?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let mut tx = state.pool.begin().await?;

    let user = db::users::create(
        &mut *tx,
        &req.username,
        &req.email,
        &pw_hash,
        Some(invite.id),
    )
    .await?;

    // A concurrent registration that won the race leaves nothing to flip;
    // roll back the account insert and report the invitation as spent.
    let consumed = db::invitations::consume(&mut *tx, invite.id).await?;
    if consumed == 0 {
        tx.rollback().await?;
        return Err(AppError::Forbidden("Invitation already used".to_string()));
    }

    tx.commit().await?;

    tracing::info!("Registered user {} via invitation {}", user.username, invite.id);

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

async fn validate_form(state: &SharedState, req: &RegisterRequest) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();

    if req.username.is_empty() {
        field_error(&mut errors, "username", "This field is required.");
    } else if db::users::find_by_username(&state.pool, &req.username)
        .await?
        .is_some()
    {
        field_error(
            &mut errors,
            "username",
            "A user with that username already exists.",
        );
    }

    if req.email.is_empty() {
        field_error(&mut errors, "email", "This field is required.");
    } else if !is_valid_email(&req.email) {
        field_error(&mut errors, "email", "Enter a valid email address.");
    } else if db::users::find_by_email(&state.pool, &req.email)
        .await?
        .is_some()
    {
        field_error(
            &mut errors,
            "email",
            "A user with that email already exists.",
        );
    }

    if req.password.is_empty() {
        field_error(&mut errors, "password", "This field is required.");
    } else if req.password.len() < 8 {
        field_error(
            &mut errors,
            "password",
            "Password must be at least 8 characters.",
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn field_error(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("alice@"));
        assert!(!is_valid_email("alice@nodot"));
        assert!(!is_valid_email("alice@.com"));
        assert!(!is_valid_email("al ice@example.com"));
    }
}
