use crate::models::DbKvRecord;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_record(pool: &Pool<Postgres>, key: &str) -> Result<Option<DbKvRecord>> {
    let record = sqlx::query_as::<_, DbKvRecord>(
        r#"
        SELECT key, value, updated_at
        FROM kv_records
        WHERE key = $1
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

pub async fn put_record(pool: &Pool<Postgres>, key: &str, value: &str) -> Result<DbKvRecord> {
    let now = Utc::now();

    tracing::debug!("Writing record: key={}, bytes={}", key, value.len());

    let record = sqlx::query_as::<_, DbKvRecord>(
        r#"
        INSERT INTO kv_records (key, value, updated_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (key)
        DO UPDATE SET value = $2, updated_at = $3
        RETURNING key, value, updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(record)
}
