//! 料格 handlers
//!
//! - GET /bins - 列出料格（每次列表都重新计算孤儿与地址重叠标记）
//! - POST /bins - 创建料格
//! - POST /bins/bulk - 批量创建 `prefix0..prefixN-1`（同一 segment，LED 0..N-1，原子）
//! - GET /bins/{id} - 料格详情（只标记孤儿）
//! - PUT /bins/{id} - 更新料格
//! - DELETE /bins/{id} - 删除料格（仍有库位时返回 409）
//! - GET /bins/{id}/parts - 料格中数量大于 0 的零件名称

use crate::AppState;
use crate::utils::response::{
    audited_bin_to_dto, bad_request_error, bin_to_dto, control_error, delete_storage_error,
    not_found_error, ok, storage_error,
};
use crate::utils::{ensure_non_negative, normalize_optional, normalize_required};
use api_contract::{BulkCreateBinsRequest, CreateBinRequest, UpdateBinRequest};
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use binlight_storage::{BinRecord, BinUpdate};
use uuid::Uuid;

/// 单次批量创建的上限。
const MAX_BULK_BINS: u32 = 1024;

pub async fn list_bins(State(state): State<AppState>) -> Response {
    match state.bin_catalog.list_bins().await {
        Ok(items) => ok(items
            .into_iter()
            .map(audited_bin_to_dto)
            .collect::<Vec<_>>()),
        Err(err) => control_error(err),
    }
}

pub async fn create_bin(
    State(state): State<AppState>,
    Json(req): Json<CreateBinRequest>,
) -> Response {
    let name = match normalize_required(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let controller_id = match normalize_required(req.controller_id, "controllerId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    if let Err(response) = ensure_non_negative(req.segment_id.into(), "segmentId") {
        return response;
    }
    if let Err(response) = ensure_non_negative(req.led_index.into(), "ledIndex") {
        return response;
    }
    let record = BinRecord::new(
        Uuid::new_v4().to_string(),
        name,
        controller_id,
        req.segment_id,
        req.led_index,
    );
    match state.bin_store.create_bin(record).await {
        Ok(record) => ok(bin_to_dto(record)),
        Err(err) => storage_error(err),
    }
}

/// 批量创建料格
///
/// 任一名称冲突或控制器不存在时整体失败，不会留下部分料格。
pub async fn bulk_create_bins(
    State(state): State<AppState>,
    Json(req): Json<BulkCreateBinsRequest>,
) -> Response {
    let controller_id = match normalize_required(req.controller_id, "controllerId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let prefix = match normalize_required(req.prefix, "prefix") {
        Ok(value) => value,
        Err(response) => return response,
    };
    if req.count == 0 || req.count > MAX_BULK_BINS {
        return bad_request_error(format!("count must be between 1 and {MAX_BULK_BINS}"));
    }
    if let Err(response) = ensure_non_negative(req.segment_id.into(), "segmentId") {
        return response;
    }
    let records: Vec<BinRecord> = (0..req.count as i32)
        .map(|index| {
            BinRecord::new(
                Uuid::new_v4().to_string(),
                format!("{prefix}{index}"),
                controller_id.clone(),
                req.segment_id,
                index,
            )
        })
        .collect();
    match state.bin_store.create_bins(records).await {
        Ok(items) => {
            tracing::info!(
                target: "binlight.api",
                controller_id = %controller_id,
                count = items.len(),
                "bins_bulk_created"
            );
            ok(items.into_iter().map(bin_to_dto).collect::<Vec<_>>())
        }
        Err(err) => storage_error(err),
    }
}

pub async fn get_bin(State(state): State<AppState>, Path(bin_id): Path<String>) -> Response {
    match state.bin_catalog.find_bin(&bin_id).await {
        Ok(Some(item)) => ok(audited_bin_to_dto(item)),
        Ok(None) => not_found_error(),
        Err(err) => control_error(err),
    }
}

pub async fn update_bin(
    State(state): State<AppState>,
    Path(bin_id): Path<String>,
    Json(req): Json<UpdateBinRequest>,
) -> Response {
    let name = match normalize_optional(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let controller_id = match normalize_optional(req.controller_id, "controllerId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    for (value, field) in [(req.segment_id, "segmentId"), (req.led_index, "ledIndex")] {
        if let Some(value) = value {
            if let Err(response) = ensure_non_negative(value.into(), field) {
                return response;
            }
        }
    }
    let update = BinUpdate {
        name,
        controller_id,
        segment_id: req.segment_id,
        led_index: req.led_index,
    };
    match state.bin_store.update_bin(&bin_id, update).await {
        Ok(Some(record)) => ok(bin_to_dto(record)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn delete_bin(State(state): State<AppState>, Path(bin_id): Path<String>) -> Response {
    match state.bin_store.delete_bin(&bin_id).await {
        Ok(true) => ok(()),
        Ok(false) => not_found_error(),
        Err(err) => delete_storage_error(err),
    }
}

pub async fn list_bin_parts(
    State(state): State<AppState>,
    Path(bin_id): Path<String>,
) -> Response {
    match state.bin_store.find_bin(&bin_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found_error(),
        Err(err) => return storage_error(err),
    }
    match state.bin_store.list_part_names_in_bin(&bin_id).await {
        Ok(names) => ok(names),
        Err(err) => storage_error(err),
    }
}
