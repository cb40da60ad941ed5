//! 料格一致性审计。
//!
//! - 孤儿：引用的控制器不存在（左连接得到的 `controller_name` 为空）
//! - 重叠：多个料格映射到同一个 `(controller_id, segment_id, led_index)`
//!
//! 孤儿不参与重叠计数，也不会被标记为重叠。每次列表都重新计算，不缓存。

use crate::ControlError;
use binlight_storage::{BinRecord, BinStore};
use std::collections::HashMap;
use std::sync::Arc;

/// 附带审计标记的料格。
#[derive(Debug, Clone)]
pub struct AuditedBin {
    pub bin: BinRecord,
    pub is_orphaned: bool,
    pub has_overlap: bool,
}

pub fn audit_bins(bins: Vec<BinRecord>) -> Vec<AuditedBin> {
    let mut occurrences: HashMap<(String, i32, i32), usize> = HashMap::new();
    for bin in bins.iter().filter(|bin| bin.controller_name.is_some()) {
        *occurrences
            .entry((bin.controller_id.clone(), bin.segment_id, bin.led_index))
            .or_default() += 1;
    }
    bins.into_iter()
        .map(|bin| {
            let is_orphaned = bin.controller_name.is_none();
            let has_overlap = !is_orphaned
                && occurrences
                    .get(&(bin.controller_id.clone(), bin.segment_id, bin.led_index))
                    .is_some_and(|count| *count > 1);
            AuditedBin {
                bin,
                is_orphaned,
                has_overlap,
            }
        })
        .collect()
}

/// 带审计的料格读取。
#[derive(Clone)]
pub struct BinCatalog {
    store: Arc<dyn BinStore>,
}

impl BinCatalog {
    pub fn new(store: Arc<dyn BinStore>) -> Self {
        Self { store }
    }

    pub async fn list_bins(&self) -> Result<Vec<AuditedBin>, ControlError> {
        let bins = self.store.list_bins().await?;
        Ok(audit_bins(bins))
    }

    /// 单条读取只标记孤儿；重叠需要完整列表才能判断。
    pub async fn find_bin(&self, bin_id: &str) -> Result<Option<AuditedBin>, ControlError> {
        let bin = self.store.find_bin(bin_id).await?;
        Ok(bin.map(|bin| AuditedBin {
            is_orphaned: bin.controller_name.is_none(),
            has_overlap: false,
            bin,
        }))
    }
}
