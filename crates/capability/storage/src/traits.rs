//! 存储接口 Trait 定义
//!
//! 定义所有资源存储的异步接口：
//! - ControllerStore：灯带控制器
//! - BinStore：料格（一个料格对应一颗 LED）
//! - PartStore：零件
//! - PartLocationStore：零件库位（零件 × 料格 × 数量）
//! - CategoryStore：分类标签
//! - AddressQuery：点灯所需的物理地址查询（只读）
//!
//! 设计原则：
//! - 所有接口返回 StorageError，约束冲突以 `StorageErrorKind` 区分
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{
    BinRecord, BinUpdate, CategoryRecord, ControllerRecord, ControllerUpdate, DashboardBinRow,
    PartLocationRecord, PartRecord,
};
use async_trait::async_trait;
use domain::{ControllerStatus, LedAddress};

/// 控制器存储接口
#[async_trait]
pub trait ControllerStore: Send + Sync {
    /// 列出所有控制器（按名称排序，附带料格数）
    async fn list_controllers(&self) -> Result<Vec<ControllerRecord>, StorageError>;

    async fn find_controller(
        &self,
        controller_id: &str,
    ) -> Result<Option<ControllerRecord>, StorageError>;

    /// 创建控制器（IP 重复返回唯一约束错误）
    async fn create_controller(
        &self,
        record: ControllerRecord,
    ) -> Result<ControllerRecord, StorageError>;

    async fn update_controller(
        &self,
        controller_id: &str,
        update: ControllerUpdate,
    ) -> Result<Option<ControllerRecord>, StorageError>;

    /// 删除控制器
    ///
    /// 仍有料格挂在该控制器下时返回外键约束错误。
    async fn delete_controller(&self, controller_id: &str) -> Result<bool, StorageError>;

    /// 写入探活结果
    ///
    /// `last_seen_at_ms` 为 `None` 时保留原值（离线不覆盖最后在线时间）。
    async fn update_controller_status(
        &self,
        controller_id: &str,
        status: ControllerStatus,
        last_seen_at_ms: Option<i64>,
    ) -> Result<bool, StorageError>;

    /// 把源控制器下的全部料格迁移到目标控制器（原子操作）
    ///
    /// 目标控制器不存在时返回 NotFound，且不移动任何料格。
    async fn migrate_bins(
        &self,
        from_controller_id: &str,
        to_controller_id: &str,
    ) -> Result<u64, StorageError>;
}

/// 料格存储接口
#[async_trait]
pub trait BinStore: Send + Sync {
    /// 列出所有料格（左连接控制器，控制器缺失时 `controller_name` 为空）
    async fn list_bins(&self) -> Result<Vec<BinRecord>, StorageError>;

    async fn find_bin(&self, bin_id: &str) -> Result<Option<BinRecord>, StorageError>;

    /// 创建料格
    ///
    /// 名称重复返回唯一约束错误；控制器不存在返回外键约束错误。
    async fn create_bin(&self, record: BinRecord) -> Result<BinRecord, StorageError>;

    /// 批量创建料格（全部成功或全部回滚）
    async fn create_bins(&self, records: Vec<BinRecord>) -> Result<Vec<BinRecord>, StorageError>;

    async fn update_bin(
        &self,
        bin_id: &str,
        update: BinUpdate,
    ) -> Result<Option<BinRecord>, StorageError>;

    /// 删除料格（仍有库位引用时返回外键约束错误）
    async fn delete_bin(&self, bin_id: &str) -> Result<bool, StorageError>;

    /// 尚未存放指定零件的料格
    async fn list_available_bins(&self, part_id: &str) -> Result<Vec<BinRecord>, StorageError>;

    /// 料格中数量大于 0 的零件名称（按名称排序）
    async fn list_part_names_in_bin(&self, bin_id: &str) -> Result<Vec<String>, StorageError>;
}

/// 零件存储接口
#[async_trait]
pub trait PartStore: Send + Sync {
    async fn create_part(&self, record: PartRecord) -> Result<PartRecord, StorageError>;

    async fn find_part(&self, part_id: &str) -> Result<Option<PartRecord>, StorageError>;
}

/// 零件库位存储接口
#[async_trait]
pub trait PartLocationStore: Send + Sync {
    /// 列出零件的所有库位（按料格名称排序）
    async fn list_part_locations(
        &self,
        part_id: &str,
    ) -> Result<Vec<PartLocationRecord>, StorageError>;

    async fn find_part_location(
        &self,
        location_id: &str,
    ) -> Result<Option<PartLocationRecord>, StorageError>;

    /// 创建库位（零件或料格不存在返回外键约束错误）
    async fn create_part_location(
        &self,
        record: PartLocationRecord,
    ) -> Result<PartLocationRecord, StorageError>;

    async fn update_part_location_quantity(
        &self,
        location_id: &str,
        quantity: i64,
    ) -> Result<Option<PartLocationRecord>, StorageError>;

    async fn delete_part_location(&self, location_id: &str) -> Result<bool, StorageError>;
}

/// 分类标签存储接口
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, StorageError>;

    /// 按名称获取标签，不存在时以 `candidate_id` 创建
    async fn ensure_category(
        &self,
        candidate_id: &str,
        name: &str,
    ) -> Result<CategoryRecord, StorageError>;

    /// 给零件打标签（重复分配忽略）
    async fn assign_category(&self, part_id: &str, category_id: &str) -> Result<(), StorageError>;

    async fn remove_category(&self, part_id: &str, category_id: &str)
        -> Result<bool, StorageError>;

    async fn list_part_categories(
        &self,
        part_id: &str,
    ) -> Result<Vec<CategoryRecord>, StorageError>;

    /// 删除未分配给任何零件的标签，返回删除数量
    async fn cleanup_orphaned_categories(&self) -> Result<u64, StorageError>;
}

/// 物理地址查询接口
///
/// 只返回控制器存在的料格（内连接），孤儿料格没有 IP，永远不会被点亮。
#[async_trait]
pub trait AddressQuery: Send + Sync {
    /// 零件所在料格的地址
    ///
    /// `positive_only = true` 只包含数量大于 0 的库位（定位），
    /// 否则包含零件关联过的全部库位（熄灭）。
    async fn part_addresses(
        &self,
        part_id: &str,
        positive_only: bool,
    ) -> Result<Vec<LedAddress>, StorageError>;

    /// 系统中全部料格的地址
    async fn all_bin_addresses(&self) -> Result<Vec<LedAddress>, StorageError>;

    /// 启用库存跟踪的零件在各料格中的看板行
    async fn dashboard_rows(&self) -> Result<Vec<DashboardBinRow>, StorageError>;
}
