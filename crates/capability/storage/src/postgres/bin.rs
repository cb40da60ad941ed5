//! Postgres 料格存储实现
//!
//! 设计要点：
//! - 列表与单条查询左连接 controllers，孤儿料格的 controller_name 为 NULL
//! - 批量创建在事务内逐条插入，任一失败整体回滚

use super::PgInventoryStore;
use crate::error::StorageError;
use crate::models::{BinRecord, BinUpdate};
use crate::traits::BinStore;
use crate::validation::{ensure_led_position, ensure_non_empty};
use sqlx::Row;
use sqlx::postgres::PgRow;

const BIN_COLUMNS: &str = "select b.bin_id, b.name, b.controller_id, b.segment_id, b.led_index, \
     c.name as controller_name \
     from bins b left join controllers c on c.controller_id = b.controller_id";

const INSERT_BIN: &str = "insert into bins (bin_id, name, controller_id, segment_id, led_index) \
     values ($1, $2, $3, $4, $5)";

fn bin_from_row(row: &PgRow) -> Result<BinRecord, StorageError> {
    Ok(BinRecord {
        bin_id: row.try_get("bin_id")?,
        name: row.try_get("name")?,
        controller_id: row.try_get("controller_id")?,
        segment_id: row.try_get("segment_id")?,
        led_index: row.try_get("led_index")?,
        controller_name: row.try_get("controller_name")?,
    })
}

fn bins_from_rows(rows: Vec<PgRow>) -> Result<Vec<BinRecord>, StorageError> {
    let mut bins = Vec::with_capacity(rows.len());
    for row in rows {
        bins.push(bin_from_row(&row)?);
    }
    Ok(bins)
}

fn check_bin(record: &BinRecord) -> Result<(), StorageError> {
    ensure_non_empty("name", &record.name)?;
    ensure_led_position(record.segment_id, record.led_index)
}

#[async_trait::async_trait]
impl BinStore for PgInventoryStore {
    async fn list_bins(&self) -> Result<Vec<BinRecord>, StorageError> {
        let sql = format!("{BIN_COLUMNS} order by b.segment_id asc, b.led_index asc, b.name asc");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        bins_from_rows(rows)
    }

    async fn find_bin(&self, bin_id: &str) -> Result<Option<BinRecord>, StorageError> {
        let sql = format!("{BIN_COLUMNS} where b.bin_id = $1");
        let row = sqlx::query(&sql)
            .bind(bin_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(bin_from_row(&row)?))
    }

    async fn create_bin(&self, record: BinRecord) -> Result<BinRecord, StorageError> {
        check_bin(&record)?;
        sqlx::query(INSERT_BIN)
            .bind(&record.bin_id)
            .bind(&record.name)
            .bind(&record.controller_id)
            .bind(record.segment_id)
            .bind(record.led_index)
            .execute(&self.pool)
            .await?;
        let created = self.find_bin(&record.bin_id).await?;
        Ok(created.unwrap_or(record))
    }

    async fn create_bins(&self, records: Vec<BinRecord>) -> Result<Vec<BinRecord>, StorageError> {
        for record in &records {
            check_bin(record)?;
        }
        let mut tx = self.pool.begin().await?;
        for record in &records {
            sqlx::query(INSERT_BIN)
                .bind(&record.bin_id)
                .bind(&record.name)
                .bind(&record.controller_id)
                .bind(record.segment_id)
                .bind(record.led_index)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        let mut created = Vec::with_capacity(records.len());
        for record in records {
            match self.find_bin(&record.bin_id).await? {
                Some(bin) => created.push(bin),
                None => created.push(record),
            }
        }
        Ok(created)
    }

    async fn update_bin(
        &self,
        bin_id: &str,
        update: BinUpdate,
    ) -> Result<Option<BinRecord>, StorageError> {
        if let Some(name) = update.name.as_deref() {
            ensure_non_empty("name", name)?;
        }
        ensure_led_position(
            update.segment_id.unwrap_or_default(),
            update.led_index.unwrap_or_default(),
        )?;
        let result = sqlx::query(
            "update bins set \
             name = coalesce($1, name), \
             controller_id = coalesce($2, controller_id), \
             segment_id = coalesce($3, segment_id), \
             led_index = coalesce($4, led_index) \
             where bin_id = $5",
        )
        .bind(update.name)
        .bind(update.controller_id)
        .bind(update.segment_id)
        .bind(update.led_index)
        .bind(bin_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_bin(bin_id).await
    }

    async fn delete_bin(&self, bin_id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from bins where bin_id = $1")
            .bind(bin_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_available_bins(&self, part_id: &str) -> Result<Vec<BinRecord>, StorageError> {
        let sql = format!(
            "{BIN_COLUMNS} where b.bin_id not in \
             (select bin_id from part_locations where part_id = $1) \
             order by b.segment_id asc, b.led_index asc, b.name asc"
        );
        let rows = sqlx::query(&sql).bind(part_id).fetch_all(&self.pool).await?;
        bins_from_rows(rows)
    }

    async fn list_part_names_in_bin(&self, bin_id: &str) -> Result<Vec<String>, StorageError> {
        let rows = sqlx::query(
            "select p.name from parts p \
             join part_locations pl on pl.part_id = p.part_id \
             where pl.bin_id = $1 and pl.quantity > 0 \
             order by p.name",
        )
        .bind(bin_id)
        .fetch_all(&self.pool)
        .await?;
        let mut names = Vec::with_capacity(rows.len());
        for row in rows {
            names.push(row.try_get("name")?);
        }
        Ok(names)
    }
}
