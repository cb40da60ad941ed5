//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers：
//! - 健康检查与指标：/health, /metrics
//! - 控制器：/controllers/*
//! - 料格：/bins/*
//! - 零件与库位：/parts/*, /locations/*
//! - 点灯：/locate/*, /stock-status
//! - 维护：/categories/cleanup

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, post, put},
};

/// 创建 API 路由
///
/// 由 [`crate::build_app`] 同时挂载在 `/` 与 `/api/` 两种前缀下
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .route("/controllers", get(list_controllers).post(create_controller))
        .route(
            "/controllers/:controller_id",
            get(get_controller)
                .put(update_controller)
                .delete(delete_controller),
        )
        .route(
            "/controllers/:controller_id/refresh",
            post(refresh_controller),
        )
        .route("/controllers/:controller_id/migrate", post(migrate_bins))
        .route("/bins", get(list_bins).post(create_bin))
        .route("/bins/bulk", post(bulk_create_bins))
        .route(
            "/bins/:bin_id",
            get(get_bin).put(update_bin).delete(delete_bin),
        )
        .route("/bins/:bin_id/parts", get(list_bin_parts))
        .route("/parts", post(create_part))
        .route("/parts/:part_id", get(get_part))
        .route("/parts/:part_id/locations", get(list_part_locations))
        .route("/parts/:part_id/available-bins", get(list_available_bins))
        .route("/locations", post(create_location))
        .route(
            "/locations/:location_id",
            put(update_location).delete(delete_location),
        )
        .route("/locate/parts/:part_id", get(get_locate_state).post(locate_part))
        .route("/locate/parts/:part_id/stop", post(stop_locate_part))
        .route("/locate/stop-all", post(stop_all))
        .route("/stock-status", post(show_stock_status))
        .route("/categories/cleanup", post(cleanup_categories))
}
