//! 零件 handlers（仅包含点灯所需的最小接口）
//!
//! - POST /parts - 创建零件，可同时指定分类标签
//! - GET /parts/{id} - 零件详情
//! - GET /parts/{id}/locations - 零件库位
//! - GET /parts/{id}/available-bins - 尚未存放该零件的料格

use crate::AppState;
use crate::utils::response::{
    bin_to_dto, location_to_dto, not_found_error, ok, part_to_dto, storage_error,
};
use crate::utils::{ensure_non_negative, normalize_required};
use api_contract::CreatePartRequest;
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use binlight_storage::{PartRecord, StorageError};
use uuid::Uuid;

/// 创建零件
///
/// 分类标签按名称复用，不存在时自动创建；空白标签忽略。
pub async fn create_part(
    State(state): State<AppState>,
    Json(req): Json<CreatePartRequest>,
) -> Response {
    let name = match normalize_required(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    if let Err(response) = ensure_non_negative(req.min_stock, "minStock") {
        return response;
    }
    if let Err(response) = ensure_non_negative(req.reorder_point, "reorderPoint") {
        return response;
    }
    let record = PartRecord {
        part_id: Uuid::new_v4().to_string(),
        name,
        min_stock: req.min_stock,
        reorder_point: req.reorder_point,
        stock_tracking_enabled: req.stock_tracking_enabled,
    };
    let record = match state.part_store.create_part(record).await {
        Ok(record) => record,
        Err(err) => return storage_error(err),
    };
    match assign_categories(&state, &record.part_id, req.categories).await {
        Ok(categories) => ok(part_to_dto(record, categories)),
        Err(err) => storage_error(err),
    }
}

pub async fn get_part(State(state): State<AppState>, Path(part_id): Path<String>) -> Response {
    let record = match state.part_store.find_part(&part_id).await {
        Ok(Some(record)) => record,
        Ok(None) => return not_found_error(),
        Err(err) => return storage_error(err),
    };
    match state.category_store.list_part_categories(&part_id).await {
        Ok(categories) => ok(part_to_dto(
            record,
            categories.into_iter().map(|item| item.name).collect(),
        )),
        Err(err) => storage_error(err),
    }
}

pub async fn list_part_locations(
    State(state): State<AppState>,
    Path(part_id): Path<String>,
) -> Response {
    match state.part_store.find_part(&part_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found_error(),
        Err(err) => return storage_error(err),
    }
    match state.location_store.list_part_locations(&part_id).await {
        Ok(items) => ok(items.into_iter().map(location_to_dto).collect::<Vec<_>>()),
        Err(err) => storage_error(err),
    }
}

pub async fn list_available_bins(
    State(state): State<AppState>,
    Path(part_id): Path<String>,
) -> Response {
    match state.bin_store.list_available_bins(&part_id).await {
        Ok(items) => ok(items.into_iter().map(bin_to_dto).collect::<Vec<_>>()),
        Err(err) => storage_error(err),
    }
}

async fn assign_categories(
    state: &AppState,
    part_id: &str,
    names: Vec<String>,
) -> Result<Vec<String>, StorageError> {
    let mut assigned: Vec<String> = Vec::new();
    for name in names {
        let name = name.trim();
        if name.is_empty() || assigned.iter().any(|item| item == name) {
            continue;
        }
        let category = state
            .category_store
            .ensure_category(&Uuid::new_v4().to_string(), name)
            .await?;
        state
            .category_store
            .assign_category(part_id, &category.category_id)
            .await?;
        assigned.push(category.name);
    }
    Ok(assigned)
}
