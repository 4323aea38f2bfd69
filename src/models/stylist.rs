use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Stylist {
    pub id: Uuid,
    pub name: String,
    /// Free-form specialty tags, e.g. ["Haircut", "Color"].
    pub specialties: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
