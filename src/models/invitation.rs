use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Single-use credential gating account creation. One non-deleted
/// invitation per email; `used` flips false -> true exactly once during
/// registration and is only reset by re-inviting the same email.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Uuid,
    pub email: String,
    pub token: Uuid,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}
