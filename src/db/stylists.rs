use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Stylist;

const ORDERABLE: &[&str] = &["name", "created_at"];

pub async fn list(
    pool: &PgPool,
    q: Option<&str>,
    ordering: Option<&str>,
) -> Result<Vec<Stylist>, sqlx::Error> {
    let order = crate::db::ordering_clause(ordering, ORDERABLE, "name");

    match q {
        Some(q) if !q.is_empty() => {
            sqlx::query_as::<_, Stylist>(&format!(
                "SELECT * FROM stylists WHERE name ILIKE $1 ORDER BY {order}"
            ))
            .bind(format!("%{q}%"))
            .fetch_all(pool)
            .await
        }
        _ => {
            sqlx::query_as::<_, Stylist>(&format!("SELECT * FROM stylists ORDER BY {order}"))
                .fetch_all(pool)
                .await
        }
    }
}

pub async fn create(
    pool: &PgPool,
    name: &str,
    specialties: &serde_json::Value,
) -> Result<Stylist, sqlx::Error> {
    sqlx::query_as::<_, Stylist>(
        "INSERT INTO stylists (name, specialties) VALUES ($1, $2) RETURNING *",
    )
    .bind(name)
    .bind(specialties)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Stylist>, sqlx::Error> {
    sqlx::query_as::<_, Stylist>("SELECT * FROM stylists WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Stylist>, sqlx::Error> {
    sqlx::query_as::<_, Stylist>("SELECT * FROM stylists WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    specialties: &serde_json::Value,
) -> Result<Stylist, sqlx::Error> {
    sqlx::query_as::<_, Stylist>(
        "UPDATE stylists SET name = $2, specialties = $3, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(specialties)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM stylists WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
