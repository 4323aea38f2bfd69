use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::Stylist;
use crate::routes::ListQuery;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateStylist {
    pub name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateStylist {
    pub name: Option<String>,
    pub specialties: Option<Vec<String>>,
}

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Stylist>>, AppError> {
    let stylists =
        db::stylists::list(&state.pool, query.q.as_deref(), query.ordering.as_deref()).await?;
    Ok(Json(stylists))
}

pub async fn create(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateStylist>,
) -> Result<Json<Stylist>, AppError> {
    if req.name.is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let specialties = serde_json::json!(req.specialties);
    let stylist = db::stylists::create(&state.pool, &req.name, &specialties).await?;
    Ok(Json(stylist))
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Stylist>, AppError> {
    let stylist = db::stylists::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Stylist not found".to_string()))?;
    Ok(Json(stylist))
}

pub async fn update(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStylist>,
) -> Result<Json<Stylist>, AppError> {
    let existing = db::stylists::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Stylist not found".to_string()))?;

    let specialties = req
        .specialties
        .map(|s| serde_json::json!(s))
        .unwrap_or(existing.specialties);

    let stylist = db::stylists::update(
        &state.pool,
        id,
        req.name.as_deref().unwrap_or(&existing.name),
        &specialties,
    )
    .await?;

    Ok(Json(stylist))
}

pub async fn delete(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::stylists::delete(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
