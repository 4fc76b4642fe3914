use async_trait::async_trait;
use eyre::Result;
use timetable_core::store::TimetableStorage;

use crate::{DbPool, repositories::kv_record};

/// Stores each record as one row of `kv_records`.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: DbPool,
}

impl PgStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimetableStorage for PgStorage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let record = kv_record::get_record(&self.pool, key).await?;
        Ok(record.map(|record| record.value))
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        kv_record::put_record(&self.pool, key, value).await?;
        Ok(())
    }
}
