//! # 灯光控制能力模块
//!
//! 把库存记录映射为控制器上的灯光命令：
//!
//! ```text
//! API 请求
//!    │
//!    ▼
//! AddressResolver（读取库存 → LedAddress）
//!    │
//!    ▼
//! classify（仅库存看板：数量 → 告急/关注/充足）
//!    │
//!    ▼
//! LedBatch（按 IP → segment 合并）
//!    │
//!    ▼
//! FanOutDispatcher（每个控制器一次请求，并发下发）
//!    │
//!    ▼
//! LedTransport（WLED JSON API）
//! ```
//!
//! - [`LocateService`]：定位/熄灭零件，返回显式的 [`LocateState`]
//! - [`StockStatusService`]：库存看板点灯（先全部熄灭，再按阈值点亮）
//! - [`BinCatalog`]：料格列表的一致性审计（孤儿、地址重叠）

pub mod audit;
pub mod batch;
pub mod classify;
pub mod dispatch;
pub mod locate;
pub mod resolver;
pub mod stock;

pub use audit::{AuditedBin, BinCatalog, audit_bins};
pub use batch::{ControllerPayload, LedBatch, batch};
pub use classify::{StatusFilter, StockLevel, classify};
pub use dispatch::{DispatchReport, FailedController, FanOutDispatcher};
pub use locate::{LocateOutcome, LocateService, LocateState, StopAllOutcome};
pub use resolver::{AddressResolver, ResolveMode};
pub use stock::{StockStatusReport, StockStatusService};

use binlight_storage::StorageError;

/// 控制链路错误。
///
/// 只有存储错误会中断流程；控制器下发失败记录在 [`DispatchReport`] 中。
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
