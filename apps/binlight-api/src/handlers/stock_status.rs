//! 库存看板点灯
//!
//! - POST /stock-status `{ "level": "all" | "critical" | "attention" }`
//!
//! 请求体可省略，省略或无法识别的 level 按 `all` 处理。

use crate::AppState;
use crate::utils::response::{control_error, dispatch_to_dto, ok};
use api_contract::{StockStatusRequest, StockStatusResponse};
use axum::{Json, extract::State, response::Response};
use binlight_control::StatusFilter;

pub async fn show_stock_status(
    State(state): State<AppState>,
    body: Option<Json<StockStatusRequest>>,
) -> Response {
    let Json(req) = body.unwrap_or_default();
    let filter = req
        .level
        .as_deref()
        .map(StatusFilter::parse)
        .unwrap_or_default();
    match state.stock_status.show_stock_status(filter).await {
        Ok(report) => {
            let message = report.message();
            ok(StockStatusResponse {
                filter: report.filter.as_str().to_string(),
                lit_count: report.lit_count,
                message,
                clear: dispatch_to_dto(report.clear),
                light: dispatch_to_dto(report.light),
            })
        }
        Err(err) => control_error(err),
    }
}
