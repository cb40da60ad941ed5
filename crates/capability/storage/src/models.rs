//! 数据模型
//!
//! 定义所有存储相关的数据模型和更新结构：
//! - 控制器模型：ControllerRecord, ControllerUpdate
//! - 料格模型：BinRecord, BinUpdate
//! - 零件与库位：PartRecord, PartLocationRecord
//! - 分类标签：CategoryRecord
//! - 看板派生行：DashboardBinRow（每次请求重新计算，不落库）

use domain::{ControllerStatus, LedAddress};

/// WLED 灯带控制器记录。
#[derive(Debug, Clone)]
pub struct ControllerRecord {
    pub controller_id: String,
    pub name: String,
    pub ip_address: String,
    pub status: ControllerStatus,
    pub last_seen_at_ms: Option<i64>,
    /// 读取时派生：挂在该控制器下的料格数。
    pub bin_count: i64,
}

impl ControllerRecord {
    /// 新建控制器：状态为 unknown，尚未探活。
    pub fn new(
        controller_id: impl Into<String>,
        name: impl Into<String>,
        ip_address: impl Into<String>,
    ) -> Self {
        Self {
            controller_id: controller_id.into(),
            name: name.into(),
            ip_address: ip_address.into(),
            status: ControllerStatus::Unknown,
            last_seen_at_ms: None,
            bin_count: 0,
        }
    }
}

/// 控制器更新输入（状态字段只由健康巡检写入，不在此处）。
#[derive(Debug, Clone, Default)]
pub struct ControllerUpdate {
    pub name: Option<String>,
    pub ip_address: Option<String>,
}

/// 料格记录。
#[derive(Debug, Clone)]
pub struct BinRecord {
    pub bin_id: String,
    pub name: String,
    pub controller_id: String,
    pub segment_id: i32,
    pub led_index: i32,
    /// 读取时通过左连接得到；为空表示引用的控制器已不存在。
    pub controller_name: Option<String>,
}

impl BinRecord {
    pub fn new(
        bin_id: impl Into<String>,
        name: impl Into<String>,
        controller_id: impl Into<String>,
        segment_id: i32,
        led_index: i32,
    ) -> Self {
        Self {
            bin_id: bin_id.into(),
            name: name.into(),
            controller_id: controller_id.into(),
            segment_id,
            led_index,
            controller_name: None,
        }
    }
}

/// 料格更新输入。
#[derive(Debug, Clone, Default)]
pub struct BinUpdate {
    pub name: Option<String>,
    pub controller_id: Option<String>,
    pub segment_id: Option<i32>,
    pub led_index: Option<i32>,
}

/// 零件记录（仅保留点灯相关字段）。
#[derive(Debug, Clone)]
pub struct PartRecord {
    pub part_id: String,
    pub name: String,
    pub min_stock: i64,
    pub reorder_point: i64,
    pub stock_tracking_enabled: bool,
}

/// 零件在某个料格中的库存。
#[derive(Debug, Clone)]
pub struct PartLocationRecord {
    pub location_id: String,
    pub part_id: String,
    pub bin_id: String,
    pub quantity: i64,
}

/// 分类标签。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub category_id: String,
    pub name: String,
}

/// 库存看板行：一个启用库存跟踪的零件在某个料格中的数量与阈值。
#[derive(Debug, Clone)]
pub struct DashboardBinRow {
    pub quantity: i64,
    pub min_stock: i64,
    pub reorder_point: i64,
    pub address: LedAddress,
}
