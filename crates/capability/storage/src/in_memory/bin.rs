//! 料格内存存储实现
//!
//! 功能：
//! - 料格 CRUD（名称唯一，控制器必须存在）
//! - 批量创建（校验全部通过后一次性写入）
//! - 可用料格、料格内零件名称查询

use super::{InMemoryInventory, InventoryState, sort_bins};
use crate::error::StorageError;
use crate::models::{BinRecord, BinUpdate};
use crate::traits::BinStore;
use crate::validation::{ensure_led_position, ensure_non_empty};
use std::collections::HashSet;

fn check_new_bin(state: &InventoryState, record: &BinRecord) -> Result<(), StorageError> {
    ensure_non_empty("name", &record.name)?;
    ensure_led_position(record.segment_id, record.led_index)?;
    if state.bins.contains_key(&record.bin_id) {
        return Err(StorageError::unique_violation("bin exists"));
    }
    if state.bin_name_taken(&record.name, None) {
        return Err(StorageError::unique_violation(format!(
            "bin name already in use: {}",
            record.name
        )));
    }
    if !state.controllers.contains_key(&record.controller_id) {
        return Err(StorageError::foreign_key_violation("controller does not exist"));
    }
    Ok(())
}

#[async_trait::async_trait]
impl BinStore for InMemoryInventory {
    async fn list_bins(&self) -> Result<Vec<BinRecord>, StorageError> {
        let state = self.read()?;
        let mut items: Vec<BinRecord> = state
            .bins
            .values()
            .map(|item| state.bin_view(item))
            .collect();
        sort_bins(&mut items);
        Ok(items)
    }

    async fn find_bin(&self, bin_id: &str) -> Result<Option<BinRecord>, StorageError> {
        let state = self.read()?;
        Ok(state.bins.get(bin_id).map(|item| state.bin_view(item)))
    }

    async fn create_bin(&self, record: BinRecord) -> Result<BinRecord, StorageError> {
        let mut state = self.write()?;
        check_new_bin(&state, &record)?;
        let record = BinRecord {
            controller_name: None,
            ..record
        };
        state.bins.insert(record.bin_id.clone(), record.clone());
        Ok(state.bin_view(&record))
    }

    async fn create_bins(&self, records: Vec<BinRecord>) -> Result<Vec<BinRecord>, StorageError> {
        let mut state = self.write()?;
        let mut names = HashSet::new();
        for record in &records {
            check_new_bin(&state, record)?;
            if !names.insert(record.name.as_str()) {
                return Err(StorageError::unique_violation(format!(
                    "bin name already in use: {}",
                    record.name
                )));
            }
        }
        let mut created = Vec::with_capacity(records.len());
        for record in records {
            let record = BinRecord {
                controller_name: None,
                ..record
            };
            state.bins.insert(record.bin_id.clone(), record.clone());
            created.push(state.bin_view(&record));
        }
        Ok(created)
    }

    async fn update_bin(
        &self,
        bin_id: &str,
        update: BinUpdate,
    ) -> Result<Option<BinRecord>, StorageError> {
        let mut state = self.write()?;
        let Some(current) = state.bins.get(bin_id).cloned() else {
            return Ok(None);
        };
        let next = BinRecord {
            bin_id: current.bin_id.clone(),
            name: update.name.unwrap_or(current.name),
            controller_id: update.controller_id.unwrap_or(current.controller_id),
            segment_id: update.segment_id.unwrap_or(current.segment_id),
            led_index: update.led_index.unwrap_or(current.led_index),
            controller_name: None,
        };
        ensure_non_empty("name", &next.name)?;
        ensure_led_position(next.segment_id, next.led_index)?;
        if state.bin_name_taken(&next.name, Some(bin_id)) {
            return Err(StorageError::unique_violation(format!(
                "bin name already in use: {}",
                next.name
            )));
        }
        if !state.controllers.contains_key(&next.controller_id) {
            return Err(StorageError::foreign_key_violation("controller does not exist"));
        }
        state.bins.insert(bin_id.to_string(), next.clone());
        Ok(Some(state.bin_view(&next)))
    }

    async fn delete_bin(&self, bin_id: &str) -> Result<bool, StorageError> {
        let mut state = self.write()?;
        if !state.bins.contains_key(bin_id) {
            return Ok(false);
        }
        if state
            .locations
            .values()
            .any(|location| location.bin_id == bin_id)
        {
            return Err(StorageError::foreign_key_violation(
                "bin still holds part locations",
            ));
        }
        state.bins.remove(bin_id);
        Ok(true)
    }

    async fn list_available_bins(&self, part_id: &str) -> Result<Vec<BinRecord>, StorageError> {
        let state = self.read()?;
        let occupied: HashSet<&str> = state
            .locations
            .values()
            .filter(|location| location.part_id == part_id)
            .map(|location| location.bin_id.as_str())
            .collect();
        let mut items: Vec<BinRecord> = state
            .bins
            .values()
            .filter(|bin| !occupied.contains(bin.bin_id.as_str()))
            .map(|bin| state.bin_view(bin))
            .collect();
        sort_bins(&mut items);
        Ok(items)
    }

    async fn list_part_names_in_bin(&self, bin_id: &str) -> Result<Vec<String>, StorageError> {
        let state = self.read()?;
        let mut names: Vec<String> = state
            .locations
            .values()
            .filter(|location| location.bin_id == bin_id && location.quantity > 0)
            .filter_map(|location| state.parts.get(&location.part_id))
            .map(|part| part.name.clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
