use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Invitation;

/// Idempotent by email: an existing unused invitation is returned as-is,
/// a used one is reset to unused (the token is kept, not rotated), and a
/// missing one is created with a fresh random token.
pub async fn get_or_create(pool: &PgPool, email: &str) -> Result<Invitation, sqlx::Error> {
    if let Some(invite) = find_by_email(pool, email).await? {
        if invite.used {
            return sqlx::query_as::<_, Invitation>(
                "UPDATE invitations SET used = false WHERE id = $1 RETURNING *",
            )
            .bind(invite.id)
            .fetch_one(pool)
            .await;
        }
        return Ok(invite);
    }

    sqlx::query_as::<_, Invitation>(
        "INSERT INTO invitations (email, token) VALUES ($1, $2) RETURNING *",
    )
    .bind(email)
    .bind(Uuid::new_v4())
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Invitation>, sqlx::Error> {
    sqlx::query_as::<_, Invitation>("SELECT * FROM invitations WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_token(pool: &PgPool, token: Uuid) -> Result<Option<Invitation>, sqlx::Error> {
    sqlx::query_as::<_, Invitation>("SELECT * FROM invitations WHERE token = $1")
        .bind(token)
        .fetch_optional(pool)
        .await
}

/// Mark an invitation used, but only if it still is unused. Returns the
/// number of rows flipped so a lost race shows up as zero.
pub async fn consume<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE invitations SET used = true WHERE id = $1 AND used = false")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
