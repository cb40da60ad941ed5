//! binlight-api 入口：加载配置、选择存储、启动巡检任务与 HTTP 服务。

use binlight_api::{AppState, build_app};
use binlight_config::AppConfig;
use binlight_storage::{InMemoryInventory, PgInventoryStore, apply_schema};
use binlight_telemetry::init_tracing;
use binlight_wled::WledClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    let transport = Arc::new(WledClient::new(
        config.ping_timeout(),
        config.command_timeout(),
    )?);

    let state = match &config.database_url {
        Some(database_url) => {
            let store = PgInventoryStore::connect(database_url).await?;
            apply_schema(&store.pool).await?;
            tracing::info!(target: "binlight.api", "storage_postgres_ready");
            AppState::new(Arc::new(store), transport)
        }
        None => {
            tracing::warn!(
                target: "binlight.api",
                "storage_in_memory_selected"
            );
            AppState::new(Arc::new(InMemoryInventory::new()), transport)
        }
    };

    if config.background_enabled {
        // 丢弃句柄不会终止任务，巡检随进程运行
        let _schedulers = state
            .health
            .spawn(config.health_interval(), config.cleanup_interval());
    }

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    tracing::info!(target: "binlight.api", addr = %config.http_addr, "http_listening");
    axum::serve(listener, app).await?;
    Ok(())
}
