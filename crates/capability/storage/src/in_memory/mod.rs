//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。
//!
//! 所有资源共享同一个 `RwLock<InventoryState>`，以便在内存中模拟
//! 数据库的外键约束与唯一约束：
//! - ControllerStore: controller.rs
//! - BinStore: bin.rs
//! - PartStore: part.rs
//! - PartLocationStore: location.rs
//! - CategoryStore: category.rs
//! - AddressQuery: address.rs

pub mod address;
pub mod bin;
pub mod category;
pub mod controller;
pub mod location;
pub mod part;

use crate::error::StorageError;
use crate::models::{
    BinRecord, CategoryRecord, ControllerRecord, PartLocationRecord, PartRecord,
};
use domain::LedAddress;
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 内存库存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryInventory {
    state: RwLock<InventoryState>,
}

#[derive(Default)]
pub(crate) struct InventoryState {
    pub(crate) controllers: HashMap<String, ControllerRecord>,
    pub(crate) bins: HashMap<String, BinRecord>,
    pub(crate) parts: HashMap<String, PartRecord>,
    pub(crate) locations: HashMap<String, PartLocationRecord>,
    pub(crate) categories: HashMap<String, CategoryRecord>,
    /// (part_id, category_id)
    pub(crate) part_categories: HashSet<(String, String)>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(InventoryState::default()),
        }
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, InventoryState>, StorageError> {
        self.state
            .read()
            .map_err(|_| StorageError::new("lock failed"))
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, InventoryState>, StorageError> {
        self.state
            .write()
            .map_err(|_| StorageError::new("lock failed"))
    }
}

impl Default for InMemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryState {
    /// 附带派生字段 bin_count 的控制器视图。
    pub(crate) fn controller_view(&self, record: &ControllerRecord) -> ControllerRecord {
        let bin_count = self
            .bins
            .values()
            .filter(|bin| bin.controller_id == record.controller_id)
            .count() as i64;
        ControllerRecord {
            bin_count,
            ..record.clone()
        }
    }

    /// 附带控制器名称（左连接语义）的料格视图。
    pub(crate) fn bin_view(&self, record: &BinRecord) -> BinRecord {
        let controller_name = self
            .controllers
            .get(&record.controller_id)
            .map(|controller| controller.name.clone());
        BinRecord {
            controller_name,
            ..record.clone()
        }
    }

    /// 料格的物理地址；控制器缺失时没有地址（内连接语义）。
    pub(crate) fn address_of(&self, bin: &BinRecord) -> Option<LedAddress> {
        self.controllers.get(&bin.controller_id).map(|controller| {
            LedAddress::new(controller.ip_address.clone(), bin.segment_id, bin.led_index)
        })
    }

    pub(crate) fn bin_name_taken(&self, name: &str, except_bin_id: Option<&str>) -> bool {
        self.bins
            .values()
            .any(|bin| bin.name == name && Some(bin.bin_id.as_str()) != except_bin_id)
    }
}

/// 料格列表的稳定顺序：segment → LED 序号 → 名称。
pub(crate) fn sort_bins(bins: &mut [BinRecord]) {
    bins.sort_by(|a, b| {
        (a.segment_id, a.led_index, &a.name).cmp(&(b.segment_id, b.led_index, &b.name))
    });
}
