//! HTTP 响应辅助函数和 DTO 转换
//!
//! 错误响应：
//! - `400 INVALID.REQUEST`：参数校验失败、引用了不存在的控制器/料格/零件
//! - `404 RESOURCE.NOT_FOUND`
//! - `409 RESOURCE.CONFLICT`：唯一约束冲突、删除仍被引用的资源
//! - `500 INTERNAL.ERROR`：其余存储错误
//!
//! DTO 转换：controller / bin / part / location / 下发汇总。

use api_contract::{
    ApiResponse, BinDto, ControllerDto, DispatchSummaryDto, FailedControllerDto,
    PartLocationDto, PartDto,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use binlight_control::{AuditedBin, ControlError, DispatchReport};
use binlight_storage::{
    BinRecord, ControllerRecord, PartLocationRecord, PartRecord, StorageError, StorageErrorKind,
};

/// 成功响应
pub fn ok<T: serde::Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

/// 资源冲突错误响应
pub fn conflict_error(message: impl Into<String>) -> Response {
    (
        StatusCode::CONFLICT,
        Json(ApiResponse::<()>::error("RESOURCE.CONFLICT", message.into())),
    )
        .into_response()
}

/// 存储错误响应（创建/更新/查询）
///
/// 外键冲突表示请求引用了不存在的资源，按 400 处理。
pub fn storage_error(err: StorageError) -> Response {
    match err.kind() {
        StorageErrorKind::UniqueViolation => conflict_error(err.message()),
        StorageErrorKind::ForeignKeyViolation | StorageErrorKind::Invalid => {
            bad_request_error(err.message())
        }
        StorageErrorKind::NotFound => not_found_error(),
        StorageErrorKind::Backend => {
            tracing::error!(target: "binlight.api", error = %err, "storage_backend_error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("INTERNAL.ERROR", err.to_string())),
            )
                .into_response()
        }
    }
}

/// 删除时的存储错误响应：资源仍被引用返回 409。
pub fn delete_storage_error(err: StorageError) -> Response {
    if err.is_foreign_key_violation() {
        return conflict_error(err.message());
    }
    storage_error(err)
}

pub fn control_error(err: ControlError) -> Response {
    match err {
        ControlError::Storage(err) => storage_error(err),
    }
}

/// ControllerRecord 转 ControllerDto
pub fn controller_to_dto(record: ControllerRecord) -> ControllerDto {
    ControllerDto {
        controller_id: record.controller_id,
        name: record.name,
        ip_address: record.ip_address,
        status: record.status.as_str().to_string(),
        last_seen_at_ms: record.last_seen_at_ms,
        bin_count: record.bin_count,
    }
}

/// 审计后的料格转 BinDto
pub fn audited_bin_to_dto(item: AuditedBin) -> BinDto {
    BinDto {
        bin_id: item.bin.bin_id,
        name: item.bin.name,
        controller_id: item.bin.controller_id,
        controller_name: item.bin.controller_name,
        segment_id: item.bin.segment_id,
        led_index: item.bin.led_index,
        is_orphaned: item.is_orphaned,
        has_overlap: item.has_overlap,
    }
}

/// 单条料格记录转 BinDto（不含重叠判断）
pub fn bin_to_dto(record: BinRecord) -> BinDto {
    let is_orphaned = record.controller_name.is_none();
    BinDto {
        bin_id: record.bin_id,
        name: record.name,
        controller_id: record.controller_id,
        controller_name: record.controller_name,
        segment_id: record.segment_id,
        led_index: record.led_index,
        is_orphaned,
        has_overlap: false,
    }
}

pub fn part_to_dto(record: PartRecord, categories: Vec<String>) -> PartDto {
    PartDto {
        part_id: record.part_id,
        name: record.name,
        min_stock: record.min_stock,
        reorder_point: record.reorder_point,
        stock_tracking_enabled: record.stock_tracking_enabled,
        categories,
    }
}

pub fn location_to_dto(record: PartLocationRecord) -> PartLocationDto {
    PartLocationDto {
        location_id: record.location_id,
        part_id: record.part_id,
        bin_id: record.bin_id,
        quantity: record.quantity,
    }
}

pub fn dispatch_to_dto(report: DispatchReport) -> DispatchSummaryDto {
    DispatchSummaryDto {
        controllers: report.controllers,
        leds: report.leds,
        failed: report
            .failed
            .into_iter()
            .map(|item| FailedControllerDto {
                ip_address: item.ip,
                error: item.error,
            })
            .collect(),
    }
}
