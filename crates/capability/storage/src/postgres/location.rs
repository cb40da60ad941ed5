//! Postgres 零件库位存储实现

use super::PgInventoryStore;
use crate::error::StorageError;
use crate::models::PartLocationRecord;
use crate::traits::PartLocationStore;
use crate::validation::ensure_quantity;
use sqlx::Row;
use sqlx::postgres::PgRow;

fn location_from_row(row: &PgRow) -> Result<PartLocationRecord, StorageError> {
    Ok(PartLocationRecord {
        location_id: row.try_get("location_id")?,
        part_id: row.try_get("part_id")?,
        bin_id: row.try_get("bin_id")?,
        quantity: row.try_get("quantity")?,
    })
}

#[async_trait::async_trait]
impl PartLocationStore for PgInventoryStore {
    async fn list_part_locations(
        &self,
        part_id: &str,
    ) -> Result<Vec<PartLocationRecord>, StorageError> {
        let rows = sqlx::query(
            "select pl.location_id, pl.part_id, pl.bin_id, pl.quantity \
             from part_locations pl join bins b on b.bin_id = pl.bin_id \
             where pl.part_id = $1 order by b.name",
        )
        .bind(part_id)
        .fetch_all(&self.pool)
        .await?;
        let mut locations = Vec::with_capacity(rows.len());
        for row in rows {
            locations.push(location_from_row(&row)?);
        }
        Ok(locations)
    }

    async fn find_part_location(
        &self,
        location_id: &str,
    ) -> Result<Option<PartLocationRecord>, StorageError> {
        let row = sqlx::query(
            "select location_id, part_id, bin_id, quantity \
             from part_locations where location_id = $1",
        )
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(location_from_row(&row)?))
    }

    async fn create_part_location(
        &self,
        record: PartLocationRecord,
    ) -> Result<PartLocationRecord, StorageError> {
        ensure_quantity(record.quantity)?;
        sqlx::query(
            "insert into part_locations (location_id, part_id, bin_id, quantity) \
             values ($1, $2, $3, $4)",
        )
        .bind(&record.location_id)
        .bind(&record.part_id)
        .bind(&record.bin_id)
        .bind(record.quantity)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn update_part_location_quantity(
        &self,
        location_id: &str,
        quantity: i64,
    ) -> Result<Option<PartLocationRecord>, StorageError> {
        ensure_quantity(quantity)?;
        let row = sqlx::query(
            "update part_locations set quantity = $1 where location_id = $2 \
             returning location_id, part_id, bin_id, quantity",
        )
        .bind(quantity)
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(location_from_row(&row)?))
    }

    async fn delete_part_location(&self, location_id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from part_locations where location_id = $1")
            .bind(location_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
