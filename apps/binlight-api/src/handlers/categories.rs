//! - POST /categories/cleanup - 立即执行一次标签清理

use crate::AppState;
use crate::utils::response::{ok, storage_error};
use api_contract::CleanupResponse;
use axum::{extract::State, response::Response};

pub async fn cleanup_categories(State(state): State<AppState>) -> Response {
    match state.health.run_cleanup_sweep().await {
        Ok(deleted) => ok(CleanupResponse { deleted }),
        Err(err) => storage_error(err),
    }
}
