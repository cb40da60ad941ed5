//! Postgres 物理地址查询实现
//!
//! 所有查询都内连接 controllers：控制器缺失的料格没有 IP，不参与点灯。

use super::PgInventoryStore;
use crate::error::StorageError;
use crate::models::DashboardBinRow;
use crate::traits::AddressQuery;
use domain::LedAddress;
use sqlx::Row;
use sqlx::postgres::PgRow;

fn address_from_row(row: &PgRow) -> Result<LedAddress, StorageError> {
    Ok(LedAddress {
        ip: row.try_get("ip_address")?,
        segment_id: row.try_get("segment_id")?,
        led_index: row.try_get("led_index")?,
    })
}

fn addresses_from_rows(rows: Vec<PgRow>) -> Result<Vec<LedAddress>, StorageError> {
    let mut addresses = Vec::with_capacity(rows.len());
    for row in rows {
        addresses.push(address_from_row(&row)?);
    }
    Ok(addresses)
}

#[async_trait::async_trait]
impl AddressQuery for PgInventoryStore {
    async fn part_addresses(
        &self,
        part_id: &str,
        positive_only: bool,
    ) -> Result<Vec<LedAddress>, StorageError> {
        let rows = sqlx::query(
            "select c.ip_address, b.segment_id, b.led_index \
             from part_locations pl \
             join bins b on b.bin_id = pl.bin_id \
             join controllers c on c.controller_id = b.controller_id \
             where pl.part_id = $1 and ($2 = false or pl.quantity > 0) \
             order by pl.location_id",
        )
        .bind(part_id)
        .bind(positive_only)
        .fetch_all(&self.pool)
        .await?;
        addresses_from_rows(rows)
    }

    async fn all_bin_addresses(&self) -> Result<Vec<LedAddress>, StorageError> {
        let rows = sqlx::query(
            "select c.ip_address, b.segment_id, b.led_index \
             from bins b join controllers c on c.controller_id = b.controller_id \
             order by c.ip_address, b.segment_id, b.led_index",
        )
        .fetch_all(&self.pool)
        .await?;
        addresses_from_rows(rows)
    }

    async fn dashboard_rows(&self) -> Result<Vec<DashboardBinRow>, StorageError> {
        let rows = sqlx::query(
            "select p.min_stock, p.reorder_point, pl.quantity, \
             c.ip_address, b.segment_id, b.led_index \
             from part_locations pl \
             join parts p on p.part_id = pl.part_id \
             join bins b on b.bin_id = pl.bin_id \
             join controllers c on c.controller_id = b.controller_id \
             where p.stock_tracking_enabled = true \
             order by c.ip_address, b.segment_id, b.led_index",
        )
        .fetch_all(&self.pool)
        .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(DashboardBinRow {
                quantity: row.try_get("quantity")?,
                min_stock: row.try_get("min_stock")?,
                reorder_point: row.try_get("reorder_point")?,
                address: address_from_row(&row)?,
            });
        }
        Ok(items)
    }
}
