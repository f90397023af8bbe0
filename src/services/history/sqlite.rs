use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{ClassificationStore, StoreError};
use crate::models::{ClassificationRecord, NewClassificationRecord};

/// Local SQLite table `tsa_checks` (see `migrations/`)
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ClassificationStore for SqliteStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn insert(&self, record: &NewClassificationRecord) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO tsa_checks (item_name, carry_on, checked_bag, description) VALUES (?, ?, ?, ?)",
        )
        .bind(&record.item_name)
        .bind(record.carry_on)
        .bind(record.checked_bag)
        .bind(&record.description)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<ClassificationRecord>, StoreError> {
        let records = sqlx::query_as::<_, ClassificationRecord>(
            r#"SELECT item_name, carry_on, checked_bag, description, created_at
               FROM tsa_checks
               ORDER BY created_at DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}
