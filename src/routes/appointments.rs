use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::appointments::{AppointmentUpdate, NewAppointment};
use crate::error::AppError;
use crate::models::{APPOINTMENT_STATUSES, Appointment};
use crate::routes::ListQuery;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateAppointment {
    pub title: String,
    pub start_time: DateTime<Utc>,
    /// Defaults to one hour after start_time.
    pub end_time: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub service_id: Option<Uuid>,
    pub stylist_id: Option<Uuid>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct PatchAppointment {
    pub title: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub service_id: Option<Uuid>,
    pub stylist_id: Option<Uuid>,
    pub status: Option<String>,
}

fn validate_status(status: &str) -> Result<(), AppError> {
    if APPOINTMENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "status must be one of: {}",
            APPOINTMENT_STATUSES.join(", ")
        )))
    }
}

fn validate_times(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::BadRequest(
            "end_time must be after start_time".to_string(),
        ));
    }
    Ok(())
}

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments =
        db::appointments::list(&state.pool, query.q.as_deref(), query.ordering.as_deref()).await?;
    Ok(Json(appointments))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateAppointment>,
) -> Result<Json<Appointment>, AppError> {
    if req.title.is_empty() {
        return Err(AppError::BadRequest("title is required".to_string()));
    }

    let status = req.status.as_deref().unwrap_or("scheduled");
    validate_status(status)?;

    let end_time = req
        .end_time
        .unwrap_or_else(|| req.start_time + Duration::hours(1));
    validate_times(req.start_time, end_time)?;

    let appointment = db::appointments::create(
        &state.pool,
        NewAppointment {
            user_id: auth.user_id,
            title: &req.title,
            start_time: req.start_time,
            end_time,
            description: req.description.as_deref(),
            service_id: req.service_id,
            stylist_id: req.stylist_id,
            status,
        },
    )
    .await
    .map_err(foreign_key_bad_request)?;

    Ok(Json(appointment))
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = db::appointments::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;
    Ok(Json(appointment))
}

pub async fn update(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatchAppointment>,
) -> Result<Json<Appointment>, AppError> {
    let existing = db::appointments::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Appointment not found".to_string()))?;

    let status = req.status.as_deref().unwrap_or(&existing.status);
    validate_status(status)?;

    let start_time = req.start_time.unwrap_or(existing.start_time);
    let end_time = req.end_time.unwrap_or(existing.end_time);
    validate_times(start_time, end_time)?;

    let appointment = db::appointments::update(
        &state.pool,
        id,
        AppointmentUpdate {
            title: req.title.as_deref().unwrap_or(&existing.title),
            start_time,
            end_time,
            description: req.description.as_deref().or(existing.description.as_deref()),
            service_id: req.service_id.or(existing.service_id),
            stylist_id: req.stylist_id.or(existing.stylist_id),
            status,
        },
    )
    .await
    .map_err(foreign_key_bad_request)?;

    Ok(Json(appointment))
}

pub async fn delete(
    _auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    db::appointments::delete(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

fn foreign_key_bad_request(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::BadRequest("Unknown service_id or stylist_id".to_string())
        }
        _ => AppError::Database(e),
    }
}
