use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Persisted prediction event tied to a user. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image_url: String,
    pub prediction: String,
    pub confidence: f64,
    pub created_at: OffsetDateTime,
}
