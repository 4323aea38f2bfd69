use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Service;

const ORDERABLE: &[&str] = &["name", "price", "duration_minutes", "created_at"];

pub async fn list(
    pool: &PgPool,
    q: Option<&str>,
    ordering: Option<&str>,
) -> Result<Vec<Service>, sqlx::Error> {
    let order = crate::db::ordering_clause(ordering, ORDERABLE, "name");

    match q {
        Some(q) if !q.is_empty() => {
            sqlx::query_as::<_, Service>(&format!(
                "SELECT * FROM services WHERE name ILIKE $1 OR description ILIKE $1
                 ORDER BY {order}"
            ))
            .bind(format!("%{q}%"))
            .fetch_all(pool)
            .await
        }
        _ => {
            sqlx::query_as::<_, Service>(&format!("SELECT * FROM services ORDER BY {order}"))
                .fetch_all(pool)
                .await
        }
    }
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM services")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

pub async fn create(
    pool: &PgPool,
    name: &str,
    description: &str,
    duration_minutes: i32,
    price: f64,
) -> Result<Service, sqlx::Error> {
    sqlx::query_as::<_, Service>(
        "INSERT INTO services (name, description, duration_minutes, price)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(name)
    .bind(description)
    .bind(duration_minutes)
    .bind(price)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Service>, sqlx::Error> {
    sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    description: &str,
    duration_minutes: i32,
    price: f64,
) -> Result<Service, sqlx::Error> {
    sqlx::query_as::<_, Service>(
        "UPDATE services
         SET name = $2, description = $3, duration_minutes = $4, price = $5, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(duration_minutes)
    .bind(price)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
