//! Postgres 控制器存储实现
//!
//! 设计要点：
//! - bin_count 通过左连接 bins 聚合得出
//! - 离线时只更新 status，保留 last_seen_at_ms
//! - 料格迁移在事务内先确认目标控制器存在

use super::PgInventoryStore;
use crate::error::StorageError;
use crate::models::{ControllerRecord, ControllerUpdate};
use crate::traits::ControllerStore;
use crate::validation::ensure_non_empty;
use domain::ControllerStatus;
use sqlx::Row;
use sqlx::postgres::PgRow;

const CONTROLLER_COLUMNS: &str = "select c.controller_id, c.name, c.ip_address, c.status, \
     c.last_seen_at_ms, count(b.bin_id) as bin_count \
     from controllers c left join bins b on b.controller_id = c.controller_id";

fn controller_from_row(row: &PgRow) -> Result<ControllerRecord, StorageError> {
    let status: String = row.try_get("status")?;
    Ok(ControllerRecord {
        controller_id: row.try_get("controller_id")?,
        name: row.try_get("name")?,
        ip_address: row.try_get("ip_address")?,
        status: ControllerStatus::parse(&status),
        last_seen_at_ms: row.try_get("last_seen_at_ms")?,
        bin_count: row.try_get("bin_count")?,
    })
}

#[async_trait::async_trait]
impl ControllerStore for PgInventoryStore {
    async fn list_controllers(&self) -> Result<Vec<ControllerRecord>, StorageError> {
        let sql = format!("{CONTROLLER_COLUMNS} group by c.controller_id order by c.name asc");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let mut controllers = Vec::with_capacity(rows.len());
        for row in rows {
            controllers.push(controller_from_row(&row)?);
        }
        Ok(controllers)
    }

    async fn find_controller(
        &self,
        controller_id: &str,
    ) -> Result<Option<ControllerRecord>, StorageError> {
        let sql = format!("{CONTROLLER_COLUMNS} where c.controller_id = $1 group by c.controller_id");
        let row = sqlx::query(&sql)
            .bind(controller_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(controller_from_row(&row)?))
    }

    async fn create_controller(
        &self,
        record: ControllerRecord,
    ) -> Result<ControllerRecord, StorageError> {
        ensure_non_empty("name", &record.name)?;
        ensure_non_empty("ip_address", &record.ip_address)?;
        sqlx::query(
            "insert into controllers (controller_id, name, ip_address, status, last_seen_at_ms) \
             values ($1, $2, $3, $4, $5)",
        )
        .bind(&record.controller_id)
        .bind(&record.name)
        .bind(&record.ip_address)
        .bind(record.status.as_str())
        .bind(record.last_seen_at_ms)
        .execute(&self.pool)
        .await?;
        Ok(ControllerRecord {
            bin_count: 0,
            ..record
        })
    }

    async fn update_controller(
        &self,
        controller_id: &str,
        update: ControllerUpdate,
    ) -> Result<Option<ControllerRecord>, StorageError> {
        if let Some(name) = update.name.as_deref() {
            ensure_non_empty("name", name)?;
        }
        if let Some(ip) = update.ip_address.as_deref() {
            ensure_non_empty("ip_address", ip)?;
        }
        let result = sqlx::query(
            "update controllers set \
             name = coalesce($1, name), \
             ip_address = coalesce($2, ip_address) \
             where controller_id = $3",
        )
        .bind(update.name)
        .bind(update.ip_address)
        .bind(controller_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_controller(controller_id).await
    }

    async fn delete_controller(&self, controller_id: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from controllers where controller_id = $1")
            .bind(controller_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_controller_status(
        &self,
        controller_id: &str,
        status: ControllerStatus,
        last_seen_at_ms: Option<i64>,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "update controllers set \
             status = $1, \
             last_seen_at_ms = coalesce($2, last_seen_at_ms) \
             where controller_id = $3",
        )
        .bind(status.as_str())
        .bind(last_seen_at_ms)
        .bind(controller_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn migrate_bins(
        &self,
        from_controller_id: &str,
        to_controller_id: &str,
    ) -> Result<u64, StorageError> {
        let mut tx = self.pool.begin().await?;
        let target = sqlx::query("select 1 from controllers where controller_id = $1")
            .bind(to_controller_id)
            .fetch_optional(&mut *tx)
            .await?;
        if target.is_none() {
            tx.rollback().await?;
            return Err(StorageError::not_found("target controller does not exist"));
        }
        let result = sqlx::query("update bins set controller_id = $1 where controller_id = $2")
            .bind(to_controller_id)
            .bind(from_controller_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }
}
