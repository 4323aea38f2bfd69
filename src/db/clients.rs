use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Client;

/// Columns exposed to the `ordering` query parameter.
const ORDERABLE: &[&str] = &["last_name", "first_name", "created_at"];

fn order_clause(ordering: Option<&str>) -> String {
    crate::db::ordering_clause(ordering, ORDERABLE, "last_name, first_name")
}

pub async fn list(
    pool: &PgPool,
    q: Option<&str>,
    ordering: Option<&str>,
) -> Result<Vec<Client>, sqlx::Error> {
    let order = order_clause(ordering);

    match q {
        Some(q) if !q.is_empty() => {
            let pattern = format!("%{q}%");
            sqlx::query_as::<_, Client>(&format!(
                "SELECT * FROM clients
                 WHERE first_name ILIKE $1 OR last_name ILIKE $1
                    OR email ILIKE $1 OR phone_number ILIKE $1
                 ORDER BY {order}"
            ))
            .bind(pattern)
            .fetch_all(pool)
            .await
        }
        _ => {
            sqlx::query_as::<_, Client>(&format!("SELECT * FROM clients ORDER BY {order}"))
                .fetch_all(pool)
                .await
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone_number: &str,
    gender: Option<&str>,
    birthdate: Option<NaiveDate>,
    notes: Option<&str>,
) -> Result<Client, sqlx::Error> {
    sqlx::query_as::<_, Client>(
        "INSERT INTO clients (first_name, last_name, email, phone_number, gender, birthdate, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(phone_number)
    .bind(gender)
    .bind(birthdate)
    .bind(notes)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Client>, sqlx::Error> {
    sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone_number: &str,
    gender: Option<&str>,
    birthdate: Option<NaiveDate>,
    notes: Option<&str>,
) -> Result<Client, sqlx::Error> {
    sqlx::query_as::<_, Client>(
        "UPDATE clients
         SET first_name = $2, last_name = $3, email = $4, phone_number = $5,
             gender = $6, birthdate = $7, notes = $8, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(phone_number)
    .bind(gender)
    .bind(birthdate)
    .bind(notes)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
