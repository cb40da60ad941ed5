//! Postgres 零件存储实现

use super::PgInventoryStore;
use crate::error::StorageError;
use crate::models::PartRecord;
use crate::traits::PartStore;
use crate::validation::ensure_non_empty;
use sqlx::Row;

#[async_trait::async_trait]
impl PartStore for PgInventoryStore {
    async fn create_part(&self, record: PartRecord) -> Result<PartRecord, StorageError> {
        ensure_non_empty("name", &record.name)?;
        sqlx::query(
            "insert into parts (part_id, name, min_stock, reorder_point, stock_tracking_enabled) \
             values ($1, $2, $3, $4, $5)",
        )
        .bind(&record.part_id)
        .bind(&record.name)
        .bind(record.min_stock)
        .bind(record.reorder_point)
        .bind(record.stock_tracking_enabled)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn find_part(&self, part_id: &str) -> Result<Option<PartRecord>, StorageError> {
        let row = sqlx::query(
            "select part_id, name, min_stock, reorder_point, stock_tracking_enabled \
             from parts where part_id = $1",
        )
        .bind(part_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(PartRecord {
            part_id: row.try_get("part_id")?,
            name: row.try_get("name")?,
            min_stock: row.try_get("min_stock")?,
            reorder_point: row.try_get("reorder_point")?,
            stock_tracking_enabled: row.try_get("stock_tracking_enabled")?,
        }))
    }
}
