use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::Service;
use crate::routes::ListQuery;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateService {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub duration_minutes: i32,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct UpdateService {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price: Option<f64>,
}

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services =
        db::services::list(&state.pool, query.q.as_deref(), query.ordering.as_deref()).await?;
    Ok(Json(services))
}

pub async fn create(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateService>,
) -> Result<Json<Service>, AppError> {
    if req.name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if req.duration_minutes <= 0 {
        return Err(AppError::BadRequest(
            "duration_minutes must be positive".to_string(),
        ));
    }
    if req.price < 0.0 {
        return Err(AppError::BadRequest("price must not be negative".to_string()));
    }

    let service = db::services::create(
        &state.pool,
        &req.name,
        &req.description,
        req.duration_minutes,
        req.price,
    )
    .await?;
    Ok(Json(service))
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Service>, AppError> {
    let service = db::services::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;
    Ok(Json(service))
}

pub async fn update(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateService>,
) -> Result<Json<Service>, AppError> {
    let existing = db::services::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

    let duration = req.duration_minutes.unwrap_or(existing.duration_minutes);
    if duration <= 0 {
        return Err(AppError::BadRequest(
            "duration_minutes must be positive".to_string(),
        ));
    }

    let service = db::services::update(
        &state.pool,
        id,
        req.name.as_deref().unwrap_or(&existing.name),
        req.description.as_deref().unwrap_or(&existing.description),
        duration,
        req.price.unwrap_or(existing.price),
    )
    .await?;

    Ok(Json(service))
}

pub async fn delete(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::services::delete(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
