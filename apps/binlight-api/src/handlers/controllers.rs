//! 控制器 handlers
//!
//! - GET /controllers - 列出控制器（按名称排序，附带料格数）
//! - POST /controllers - 创建控制器（IP 唯一）
//! - GET /controllers/{id} - 控制器详情
//! - PUT /controllers/{id} - 更新名称/IP
//! - DELETE /controllers/{id} - 删除控制器（仍有料格时返回 409）
//! - POST /controllers/{id}/refresh - 立即探活并返回最新状态
//! - POST /controllers/{id}/migrate - 把全部料格迁移到另一个控制器

use crate::AppState;
use crate::utils::response::{
    bad_request_error, controller_to_dto, delete_storage_error, not_found_error, ok,
    storage_error,
};
use crate::utils::{normalize_optional, normalize_required};
use api_contract::{
    CreateControllerRequest, MigrateBinsRequest, MigrateBinsResponse, UpdateControllerRequest,
};
use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use binlight_storage::{ControllerRecord, ControllerUpdate};
use uuid::Uuid;

pub async fn list_controllers(State(state): State<AppState>) -> Response {
    match state.controller_store.list_controllers().await {
        Ok(items) => ok(items
            .into_iter()
            .map(controller_to_dto)
            .collect::<Vec<_>>()),
        Err(err) => storage_error(err),
    }
}

/// 创建控制器
///
/// 名称与 IP 去除首尾空格后不能为空；IP 已被其他控制器占用时返回 409。
/// 新控制器状态为 `unknown`，等待下一次巡检或手动刷新。
pub async fn create_controller(
    State(state): State<AppState>,
    Json(req): Json<CreateControllerRequest>,
) -> Response {
    let name = match normalize_required(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let ip_address = match normalize_required(req.ip_address, "ipAddress") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let record = ControllerRecord::new(Uuid::new_v4().to_string(), name, ip_address);
    match state.controller_store.create_controller(record).await {
        Ok(record) => {
            tracing::info!(
                target: "binlight.api",
                controller_id = %record.controller_id,
                ip = %record.ip_address,
                "controller_created"
            );
            ok(controller_to_dto(record))
        }
        Err(err) => storage_error(err),
    }
}

pub async fn get_controller(
    State(state): State<AppState>,
    Path(controller_id): Path<String>,
) -> Response {
    match state.controller_store.find_controller(&controller_id).await {
        Ok(Some(record)) => ok(controller_to_dto(record)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn update_controller(
    State(state): State<AppState>,
    Path(controller_id): Path<String>,
    Json(req): Json<UpdateControllerRequest>,
) -> Response {
    let name = match normalize_optional(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let ip_address = match normalize_optional(req.ip_address, "ipAddress") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let update = ControllerUpdate { name, ip_address };
    match state
        .controller_store
        .update_controller(&controller_id, update)
        .await
    {
        Ok(Some(record)) => ok(controller_to_dto(record)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

pub async fn delete_controller(
    State(state): State<AppState>,
    Path(controller_id): Path<String>,
) -> Response {
    match state.controller_store.delete_controller(&controller_id).await {
        Ok(true) => ok(()),
        Ok(false) => not_found_error(),
        Err(err) => delete_storage_error(err),
    }
}

/// 手动探活单个控制器
pub async fn refresh_controller(
    State(state): State<AppState>,
    Path(controller_id): Path<String>,
) -> Response {
    match state.health.refresh_controller(&controller_id).await {
        Ok(Some(record)) => ok(controller_to_dto(record)),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 迁移料格
///
/// 源控制器不存在返回 404；目标不存在时不移动任何料格，同样返回 404。
pub async fn migrate_bins(
    State(state): State<AppState>,
    Path(controller_id): Path<String>,
    Json(req): Json<MigrateBinsRequest>,
) -> Response {
    let target = match normalize_required(req.target_controller_id, "targetControllerId") {
        Ok(value) => value,
        Err(response) => return response,
    };
    if target == controller_id {
        return bad_request_error("target controller must differ from source");
    }
    match state.controller_store.find_controller(&controller_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found_error(),
        Err(err) => return storage_error(err),
    }
    match state
        .controller_store
        .migrate_bins(&controller_id, &target)
        .await
    {
        Ok(moved) => {
            tracing::info!(
                target: "binlight.api",
                from = %controller_id,
                to = %target,
                moved,
                "controller_bins_migrated"
            );
            ok(MigrateBinsResponse { moved })
        }
        Err(err) => storage_error(err),
    }
}
