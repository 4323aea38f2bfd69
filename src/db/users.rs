use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    username: &str,
    email: &str,
    password_hash: &str,
    invitation_id: Option<Uuid>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, email, password_hash, invitation_id)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(invitation_id)
    .fetch_one(executor)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
