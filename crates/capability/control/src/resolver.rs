//! 地址解析：库存记录 → LED 物理地址。

use crate::ControlError;
use binlight_storage::AddressQuery;
use domain::LedAddress;
use std::sync::Arc;

/// 解析模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// 只包含数量大于 0 的料格。
    Locate,
    /// 包含零件关联过的全部料格，保证熄灭覆盖所有可能点亮过的灯。
    Stop,
}

#[derive(Clone)]
pub struct AddressResolver {
    query: Arc<dyn AddressQuery>,
}

impl AddressResolver {
    pub fn new(query: Arc<dyn AddressQuery>) -> Self {
        Self { query }
    }

    pub async fn resolve_for_part(
        &self,
        part_id: &str,
        mode: ResolveMode,
    ) -> Result<Vec<LedAddress>, ControlError> {
        let positive_only = mode == ResolveMode::Locate;
        Ok(self.query.part_addresses(part_id, positive_only).await?)
    }

    /// 系统中所有控制器存在的料格。
    pub async fn resolve_all(&self) -> Result<Vec<LedAddress>, ControlError> {
        Ok(self.query.all_bin_addresses().await?)
    }
}
