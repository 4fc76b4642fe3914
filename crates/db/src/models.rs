use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbKvRecord {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}
