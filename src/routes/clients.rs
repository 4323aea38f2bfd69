use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::Client;
use crate::routes::ListQuery;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update; absent fields keep their current value. Serves both
/// PUT and PATCH.
#[derive(Deserialize)]
pub struct UpdateClient {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub notes: Option<String>,
}

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Client>>, AppError> {
    let clients =
        db::clients::list(&state.pool, query.q.as_deref(), query.ordering.as_deref()).await?;
    Ok(Json(clients))
}

pub async fn create(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateClient>,
) -> Result<Json<Client>, AppError> {
    if req.first_name.is_empty() || req.last_name.is_empty() || req.email.is_empty() {
        return Err(AppError::BadRequest(
            "first_name, last_name and email are required".to_string(),
        ));
    }

    let client = db::clients::create(
        &state.pool,
        &req.first_name,
        &req.last_name,
        &req.email,
        &req.phone_number,
        req.gender.as_deref(),
        req.birthdate,
        req.notes.as_deref(),
    )
    .await
    .map_err(unique_email_conflict)?;

    Ok(Json(client))
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Client>, AppError> {
    let client = db::clients::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;
    Ok(Json(client))
}

pub async fn update(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateClient>,
) -> Result<Json<Client>, AppError> {
    let existing = db::clients::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;

    let client = db::clients::update(
        &state.pool,
        id,
        req.first_name.as_deref().unwrap_or(&existing.first_name),
        req.last_name.as_deref().unwrap_or(&existing.last_name),
        req.email.as_deref().unwrap_or(&existing.email),
        req.phone_number.as_deref().unwrap_or(&existing.phone_number),
        req.gender.as_deref().or(existing.gender.as_deref()),
        req.birthdate.or(existing.birthdate),
        req.notes.as_deref().or(existing.notes.as_deref()),
    )
    .await
    .map_err(unique_email_conflict)?;

    Ok(Json(client))
}

pub async fn delete(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::clients::delete(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

fn unique_email_conflict(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A client with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    }
}
