//! 物理地址查询内存实现
//!
//! 与 Postgres 实现一致：控制器缺失的料格不产生地址。

use super::InMemoryInventory;
use crate::error::StorageError;
use crate::models::DashboardBinRow;
use crate::traits::AddressQuery;
use domain::LedAddress;

#[async_trait::async_trait]
impl AddressQuery for InMemoryInventory {
    async fn part_addresses(
        &self,
        part_id: &str,
        positive_only: bool,
    ) -> Result<Vec<LedAddress>, StorageError> {
        let state = self.read()?;
        let mut locations: Vec<_> = state
            .locations
            .values()
            .filter(|location| location.part_id == part_id)
            .filter(|location| !positive_only || location.quantity > 0)
            .collect();
        locations.sort_by(|a, b| a.location_id.cmp(&b.location_id));
        Ok(locations
            .into_iter()
            .filter_map(|location| state.bins.get(&location.bin_id))
            .filter_map(|bin| state.address_of(bin))
            .collect())
    }

    async fn all_bin_addresses(&self) -> Result<Vec<LedAddress>, StorageError> {
        let state = self.read()?;
        let mut addresses: Vec<LedAddress> = state
            .bins
            .values()
            .filter_map(|bin| state.address_of(bin))
            .collect();
        addresses.sort();
        Ok(addresses)
    }

    async fn dashboard_rows(&self) -> Result<Vec<DashboardBinRow>, StorageError> {
        let state = self.read()?;
        let mut rows = Vec::new();
        for location in state.locations.values() {
            let Some(part) = state.parts.get(&location.part_id) else {
                continue;
            };
            if !part.stock_tracking_enabled {
                continue;
            }
            let Some(address) = state
                .bins
                .get(&location.bin_id)
                .and_then(|bin| state.address_of(bin))
            else {
                continue;
            };
            rows.push(DashboardBinRow {
                quantity: location.quantity,
                min_stock: part.min_stock,
                reorder_point: part.reorder_point,
                address,
            });
        }
        rows.sort_by(|a, b| a.address.cmp(&b.address));
        Ok(rows)
    }
}
