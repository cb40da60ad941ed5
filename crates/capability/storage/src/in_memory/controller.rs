//! 控制器内存存储实现
//!
//! 功能：
//! - 控制器 CRUD（IP 唯一）
//! - 删除时校验料格引用（模拟外键）
//! - 探活结果写入、料格迁移

use super::InMemoryInventory;
use crate::error::StorageError;
use crate::models::{ControllerRecord, ControllerUpdate};
use crate::traits::ControllerStore;
use crate::validation::ensure_non_empty;
use domain::ControllerStatus;

#[async_trait::async_trait]
impl ControllerStore for InMemoryInventory {
    async fn list_controllers(&self) -> Result<Vec<ControllerRecord>, StorageError> {
        let state = self.read()?;
        let mut items: Vec<ControllerRecord> = state
            .controllers
            .values()
            .map(|item| state.controller_view(item))
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.controller_id.cmp(&b.controller_id)));
        Ok(items)
    }

    async fn find_controller(
        &self,
        controller_id: &str,
    ) -> Result<Option<ControllerRecord>, StorageError> {
        let state = self.read()?;
        Ok(state
            .controllers
            .get(controller_id)
            .map(|item| state.controller_view(item)))
    }

    async fn create_controller(
        &self,
        record: ControllerRecord,
    ) -> Result<ControllerRecord, StorageError> {
        ensure_non_empty("name", &record.name)?;
        ensure_non_empty("ip_address", &record.ip_address)?;
        let mut state = self.write()?;
        if state.controllers.contains_key(&record.controller_id) {
            return Err(StorageError::unique_violation("controller exists"));
        }
        if state
            .controllers
            .values()
            .any(|item| item.ip_address == record.ip_address)
        {
            return Err(StorageError::unique_violation("ip_address already in use"));
        }
        let record = ControllerRecord {
            bin_count: 0,
            ..record
        };
        state
            .controllers
            .insert(record.controller_id.clone(), record.clone());
        Ok(record)
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
        let mut state = self.write()?;
        if !state.controllers.contains_key(controller_id) {
            return Ok(None);
        }
        if let Some(ip) = update.ip_address.as_deref() {
            let taken = state
                .controllers
                .values()
                .any(|item| item.ip_address == ip && item.controller_id != controller_id);
            if taken {
                return Err(StorageError::unique_violation("ip_address already in use"));
            }
        }
        let Some(controller) = state.controllers.get_mut(controller_id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            controller.name = name;
        }
        if let Some(ip) = update.ip_address {
            controller.ip_address = ip;
        }
        let updated = controller.clone();
        Ok(Some(state.controller_view(&updated)))
    }

    async fn delete_controller(&self, controller_id: &str) -> Result<bool, StorageError> {
        let mut state = self.write()?;
        if !state.controllers.contains_key(controller_id) {
            return Ok(false);
        }
        if state
            .bins
            .values()
            .any(|bin| bin.controller_id == controller_id)
        {
            return Err(StorageError::foreign_key_violation(
                "controller still has bins assigned",
            ));
        }
        state.controllers.remove(controller_id);
        Ok(true)
    }

    async fn update_controller_status(
        &self,
        controller_id: &str,
        status: ControllerStatus,
        last_seen_at_ms: Option<i64>,
    ) -> Result<bool, StorageError> {
        let mut state = self.write()?;
        let Some(controller) = state.controllers.get_mut(controller_id) else {
            return Ok(false);
        };
        controller.status = status;
        if let Some(last_seen) = last_seen_at_ms {
            controller.last_seen_at_ms = Some(last_seen);
        }
        Ok(true)
    }

    async fn migrate_bins(
        &self,
        from_controller_id: &str,
        to_controller_id: &str,
    ) -> Result<u64, StorageError> {
        let mut state = self.write()?;
        if !state.controllers.contains_key(to_controller_id) {
            return Err(StorageError::not_found("target controller does not exist"));
        }
        let mut moved = 0;
        for bin in state.bins.values_mut() {
            if bin.controller_id == from_controller_id {
                bin.controller_id = to_controller_id.to_string();
                moved += 1;
            }
        }
        Ok(moved)
    }
}
