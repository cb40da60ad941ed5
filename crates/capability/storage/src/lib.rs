//! # binlight Storage 模块
//!
//! 本模块提供库存与灯带映射数据的存储抽象层，支持多种存储后端实现。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：定义所有资源存储的异步 Trait 接口
//! 2. **数据模型层** (`models.rs`)：定义存储相关的数据结构
//! 3. **错误处理层** (`error.rs`)：带分类的存储错误（唯一约束、外键约束等）
//! 4. **验证辅助层** (`validation.rs`)：写入前的输入校验
//! 5. **连接管理层** (`connection.rs`)：数据库连接池管理
//! 6. **实现层**：
//!    - `in_memory/`：内存存储实现（用于测试和演示）
//!    - `postgres/`：PostgreSQL 存储实现（生产环境使用）
//!
//! ## 数据关系
//!
//! - 控制器 1-N 料格：删除仍有料格的控制器被拒绝（外键约束）
//! - 料格 1-N 库位 N-1 零件：删除零件级联删除其库位
//! - 零件 N-N 分类标签：未分配的标签由定时清理删除
//!
//! ## 约束
//!
//! - `(controller_id, segment_id, led_index)` 不做唯一约束，
//!   重叠与孤儿料格由控制层的一致性审计在读取时标记
//! - 地址查询（`AddressQuery`）只返回控制器存在的料格
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use binlight_storage::{ControllerRecord, ControllerStore, InMemoryInventory};
//!
//! let store = InMemoryInventory::new();
//! store
//!     .create_controller(ControllerRecord::new("ctrl-1", "Rack A", "192.168.1.50"))
//!     .await?;
//! ```

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;
pub mod validation;

pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;
pub use validation::*;

pub use in_memory::InMemoryInventory;
pub use postgres::PgInventoryStore;
