//! 库位 handlers
//!
//! - POST /locations - 把零件放入料格（零件或料格不存在返回 400）
//! - PUT /locations/{id} - 更新数量
//! - DELETE /locations/{id} - 移除库位

use crate::AppState;
use crate::utils::response::{location_to_dto, not_found_error, ok, storage_error};
use crate::utils::{ensure_non_negative, normalize_required};
use api_contract::{CreateLocationRequest, UpdateLocationRequest};
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use binlight_storage::PartLocationRecord;
use uuid::Uuid;

pub async fn create_location(
    State(state): State<AppState>,
    Json(req): Json<CreateLocationRequest>,
) -> Response {
    let part_id = match normalize_required(req.part_id, "partId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let bin_id = match normalize_required(req.bin_id, "binId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    if let Err(response) = ensure_non_negative(req.quantity, "quantity") {
        return response;
    }
    let record = PartLocationRecord {
        location_id: Uuid::new_v4().to_string(),
        part_id,
        bin_id,
        quantity: req.quantity,
    };
    match state.location_store.create_part_location(record).await {
        Ok(record) => ok(location_to_dto(record)),
        Err(err) => storage_error(err),
    }
}

pub async fn update_location(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
    Json(req): Json<UpdateLocationRequest>,
) -> Response {
    if let Err(response) = ensure_non_negative(req.quantity, "quantity") {
        return response;
    }
    match state
        .location_store
        .update_part_location_quantity(&location_id, req.quantity)
        .await
    {
        Ok(Some(record)) => ok(location_to_dto(record)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn delete_location(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
) -> Response {
    match state.location_store.delete_part_location(&location_id).await {
        Ok(true) => ok(()),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}
