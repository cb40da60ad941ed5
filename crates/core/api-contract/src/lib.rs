//! 稳定的 DTO 与 API 响应契约。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 控制器创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateControllerRequest {
    pub name: String,
    #[serde(alias = "ip_address")]
    pub ip_address: String,
}

/// 控制器更新请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateControllerRequest {
    pub name: Option<String>,
    #[serde(alias = "ip_address")]
    pub ip_address: Option<String>,
}

/// 料格迁移请求体：把当前控制器下的全部料格移到目标控制器。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateBinsRequest {
    #[serde(alias = "target_controller_id")]
    pub target_controller_id: String,
}

/// 控制器返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerDto {
    pub controller_id: String,
    pub name: String,
    pub ip_address: String,
    pub status: String,
    pub last_seen_at_ms: Option<i64>,
    pub bin_count: i64,
}

/// 料格迁移结果。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateBinsResponse {
    pub moved: u64,
}

/// 料格创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBinRequest {
    pub name: String,
    #[serde(alias = "controller_id")]
    pub controller_id: String,
    #[serde(alias = "segment_id", default)]
    pub segment_id: i32,
    #[serde(alias = "led_index")]
    pub led_index: i32,
}

/// 料格更新请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBinRequest {
    pub name: Option<String>,
    #[serde(alias = "controller_id")]
    pub controller_id: Option<String>,
    #[serde(alias = "segment_id")]
    pub segment_id: Option<i32>,
    #[serde(alias = "led_index")]
    pub led_index: Option<i32>,
}

/// 批量创建料格请求体：生成 `prefix0..prefix{count-1}`，LED 序号与名称后缀一致。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateBinsRequest {
    #[serde(alias = "controller_id")]
    pub controller_id: String,
    #[serde(alias = "segment_id", default)]
    pub segment_id: i32,
    pub count: u32,
    pub prefix: String,
}

/// 料格返回结构（附带一致性审计标记）。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinDto {
    pub bin_id: String,
    pub name: String,
    pub controller_id: String,
    pub controller_name: Option<String>,
    pub segment_id: i32,
    pub led_index: i32,
    pub is_orphaned: bool,
    pub has_overlap: bool,
}

/// 零件创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartRequest {
    pub name: String,
    #[serde(alias = "min_stock", default)]
    pub min_stock: i64,
    #[serde(alias = "reorder_point", default)]
    pub reorder_point: i64,
    #[serde(alias = "stock_tracking_enabled", default)]
    pub stock_tracking_enabled: bool,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// 零件返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartDto {
    pub part_id: String,
    pub name: String,
    pub min_stock: i64,
    pub reorder_point: i64,
    pub stock_tracking_enabled: bool,
    pub categories: Vec<String>,
}

/// 库位创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    #[serde(alias = "part_id")]
    pub part_id: String,
    #[serde(alias = "bin_id")]
    pub bin_id: String,
    pub quantity: i64,
}

/// 库位数量更新请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationRequest {
    pub quantity: i64,
}

/// 库位返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartLocationDto {
    pub location_id: String,
    pub part_id: String,
    pub bin_id: String,
    pub quantity: i64,
}

/// 单个控制器下发失败明细。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedControllerDto {
    pub ip_address: String,
    pub error: String,
}

/// 一次扇出下发的汇总。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchSummaryDto {
    pub controllers: usize,
    pub leds: usize,
    pub failed: Vec<FailedControllerDto>,
}

/// 定位请求的返回结构。
///
/// `state` 为 `started` / `stopped`；`resetAll` 仅在全部停止时为 true，
/// 前端据此把所有定位按钮恢复为初始状态。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateResponse {
    pub part_id: Option<String>,
    pub state: String,
    pub reset_all: bool,
    pub dispatch: Option<DispatchSummaryDto>,
}

/// 库存看板点灯请求体。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStatusRequest {
    #[serde(default)]
    pub level: Option<String>,
}

/// 库存看板点灯结果。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStatusResponse {
    pub filter: String,
    pub lit_count: usize,
    pub message: String,
    pub clear: DispatchSummaryDto,
    pub light: DispatchSummaryDto,
}

/// 标签清理结果。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    pub deleted: u64,
}

/// 指标快照返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub commands_sent: u64,
    pub commands_succeeded: u64,
    pub commands_failed: u64,
    pub leds_addressed: u64,
    pub locate_requests: u64,
    pub locate_failures: u64,
    pub health_sweeps: u64,
    pub pings_online: u64,
    pub pings_offline: u64,
    pub cleanup_runs: u64,
    pub cleanup_failures: u64,
    pub categories_deleted: u64,
}
