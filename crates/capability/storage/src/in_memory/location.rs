//! 零件库位内存存储实现
//!
//! 功能：
//! - 库位增删改（数量不能为负）
//! - 零件与料格必须存在（模拟外键）

use super::InMemoryInventory;
use crate::error::StorageError;
use crate::models::PartLocationRecord;
use crate::traits::PartLocationStore;
use crate::validation::ensure_quantity;

#[async_trait::async_trait]
impl PartLocationStore for InMemoryInventory {
    async fn list_part_locations(
        &self,
        part_id: &str,
    ) -> Result<Vec<PartLocationRecord>, StorageError> {
        let state = self.read()?;
        let mut items: Vec<(String, PartLocationRecord)> = state
            .locations
            .values()
            .filter(|location| location.part_id == part_id)
            .filter_map(|location| {
                state
                    .bins
                    .get(&location.bin_id)
                    .map(|bin| (bin.name.clone(), location.clone()))
            })
            .collect();
        items.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(items.into_iter().map(|(_, location)| location).collect())
    }

    async fn find_part_location(
        &self,
        location_id: &str,
    ) -> Result<Option<PartLocationRecord>, StorageError> {
        let state = self.read()?;
        Ok(state.locations.get(location_id).cloned())
    }

    async fn create_part_location(
        &self,
        record: PartLocationRecord,
    ) -> Result<PartLocationRecord, StorageError> {
        ensure_quantity(record.quantity)?;
        let mut state = self.write()?;
        if state.locations.contains_key(&record.location_id) {
            return Err(StorageError::unique_violation("location exists"));
        }
        if !state.parts.contains_key(&record.part_id) {
            return Err(StorageError::foreign_key_violation("part does not exist"));
        }
        if !state.bins.contains_key(&record.bin_id) {
            return Err(StorageError::foreign_key_violation("bin does not exist"));
        }
        state
            .locations
            .insert(record.location_id.clone(), record.clone());
        Ok(record)
    }

    async fn update_part_location_quantity(
        &self,
        location_id: &str,
        quantity: i64,
    ) -> Result<Option<PartLocationRecord>, StorageError> {
        ensure_quantity(quantity)?;
        let mut state = self.write()?;
        let Some(location) = state.locations.get_mut(location_id) else {
            return Ok(None);
        };
        location.quantity = quantity;
        Ok(Some(location.clone()))
    }

    async fn delete_part_location(&self, location_id: &str) -> Result<bool, StorageError> {
        let mut state = self.write()?;
        Ok(state.locations.remove(location_id).is_some())
    }
}
