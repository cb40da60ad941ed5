//! binlight HTTP API
//!
//! - [`AppState`]：存储与控制服务的共享句柄
//! - [`build_app`]：组装路由（同时挂载在 `/` 与 `/api` 下）、请求追踪中间件

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod utils;

use axum::Router;
use binlight_control::{
    AddressResolver, BinCatalog, FanOutDispatcher, LocateService, StockStatusService,
};
use binlight_health::HealthMonitor;
use binlight_storage::{
    AddressQuery, BinStore, CategoryStore, ControllerStore, PartLocationStore, PartStore,
};
use binlight_wled::LedTransport;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub controller_store: Arc<dyn ControllerStore>,
    pub bin_store: Arc<dyn BinStore>,
    pub part_store: Arc<dyn PartStore>,
    pub location_store: Arc<dyn PartLocationStore>,
    pub category_store: Arc<dyn CategoryStore>,
    pub bin_catalog: BinCatalog,
    pub locate: LocateService,
    pub stock_status: StockStatusService,
    pub health: HealthMonitor,
}

impl AppState {
    /// 以同一个库存存储实现所有存储接口（Postgres 或内存）。
    pub fn new<S>(store: Arc<S>, transport: Arc<dyn LedTransport>) -> Self
    where
        S: ControllerStore
            + BinStore
            + PartStore
            + PartLocationStore
            + CategoryStore
            + AddressQuery
            + 'static,
    {
        let resolver = AddressResolver::new(store.clone());
        let dispatcher = FanOutDispatcher::new(transport.clone());
        Self {
            controller_store: store.clone(),
            bin_store: store.clone(),
            part_store: store.clone(),
            location_store: store.clone(),
            category_store: store.clone(),
            bin_catalog: BinCatalog::new(store.clone()),
            locate: LocateService::new(resolver.clone(), dispatcher.clone()),
            stock_status: StockStatusService::new(store.clone(), resolver, dispatcher),
            health: HealthMonitor::new(store.clone(), store, transport),
        }
    }
}

/// 组装完整应用：`/` 与 `/api` 两套前缀共享同一组 handler。
pub fn build_app(state: AppState) -> Router {
    let api = routes::create_api_router();
    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 注入 request_id/trace_id
        .layer(axum::middleware::from_fn(middleware::request_context))
}
