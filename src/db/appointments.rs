use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Appointment;

const ORDERABLE: &[&str] = &["start_time", "end_time", "created_at", "status"];

pub async fn list(
    pool: &PgPool,
    q: Option<&str>,
    ordering: Option<&str>,
) -> Result<Vec<Appointment>, sqlx::Error> {
    let order = crate::db::ordering_clause(ordering, ORDERABLE, "start_time");

    match q {
        Some(q) if !q.is_empty() => {
            sqlx::query_as::<_, Appointment>(&format!(
                "SELECT * FROM appointments
                 WHERE title ILIKE $1 OR description ILIKE $1
                 ORDER BY {order}"
            ))
            .bind(format!("%{q}%"))
            .fetch_all(pool)
            .await
        }
        _ => {
            sqlx::query_as::<_, Appointment>(&format!(
                "SELECT * FROM appointments ORDER BY {order}"
            ))
            .fetch_all(pool)
            .await
        }
    }
}

pub struct NewAppointment<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<&'a str>,
    pub service_id: Option<Uuid>,
    pub stylist_id: Option<Uuid>,
    pub status: &'a str,
}

pub async fn create(pool: &PgPool, appt: NewAppointment<'_>) -> Result<Appointment, sqlx::Error> {
    sqlx::query_as::<_, Appointment>(
        "INSERT INTO appointments
             (user_id, title, start_time, end_time, description, service_id, stylist_id, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(appt.user_id)
    .bind(appt.title)
    .bind(appt.start_time)
    .bind(appt.end_time)
    .bind(appt.description)
    .bind(appt.service_id)
    .bind(appt.stylist_id)
    .bind(appt.status)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Appointment>, sqlx::Error> {
    sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct AppointmentUpdate<'a> {
    pub title: &'a str,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<&'a str>,
    pub service_id: Option<Uuid>,
    pub stylist_id: Option<Uuid>,
    pub status: &'a str,
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    appt: AppointmentUpdate<'_>,
) -> Result<Appointment, sqlx::Error> {
    sqlx::query_as::<_, Appointment>(
        "UPDATE appointments
         SET title = $2, start_time = $3, end_time = $4, description = $5,
             service_id = $6, stylist_id = $7, status = $8, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(appt.title)
    .bind(appt.start_time)
    .bind(appt.end_time)
    .bind(appt.description)
    .bind(appt.service_id)
    .bind(appt.stylist_id)
    .bind(appt.status)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
