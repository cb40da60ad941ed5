//! 定位 handlers
//!
//! - POST /locate/parts/{id} - 点亮零件所在料格
//! - POST /locate/parts/{id}/stop - 熄灭零件关联过的全部料格
//! - GET /locate/parts/{id} - 当前定位状态（无服务端记忆，总是 `stopped`）
//! - POST /locate/stop-all - 熄灭全部料格并通知前端复位
//!
//! 控制器下发失败不会变成 HTTP 错误：定位失败以 `state = stopped` 返回，
//! 失败明细在 `dispatch.failed` 中。

use crate::AppState;
use crate::utils::response::{control_error, dispatch_to_dto, ok};
use api_contract::LocateResponse;
use axum::{
    extract::{Path, State},
    response::Response,
};

pub async fn locate_part(State(state): State<AppState>, Path(part_id): Path<String>) -> Response {
    match state.locate.locate(&part_id).await {
        Ok(outcome) => ok(LocateResponse {
            part_id: Some(part_id),
            state: outcome.state.as_str().to_string(),
            reset_all: false,
            dispatch: Some(dispatch_to_dto(outcome.report)),
        }),
        Err(err) => control_error(err),
    }
}

pub async fn stop_locate_part(
    State(state): State<AppState>,
    Path(part_id): Path<String>,
) -> Response {
    match state.locate.stop(&part_id).await {
        Ok(outcome) => ok(LocateResponse {
            part_id: Some(part_id),
            state: outcome.state.as_str().to_string(),
            reset_all: false,
            dispatch: Some(dispatch_to_dto(outcome.report)),
        }),
        Err(err) => control_error(err),
    }
}

pub async fn get_locate_state(
    State(state): State<AppState>,
    Path(part_id): Path<String>,
) -> Response {
    let current = state.locate.locate_state_for(&part_id);
    ok(LocateResponse {
        part_id: Some(part_id),
        state: current.as_str().to_string(),
        reset_all: false,
        dispatch: None,
    })
}

pub async fn stop_all(State(state): State<AppState>) -> Response {
    match state.locate.stop_all().await {
        Ok(outcome) => ok(LocateResponse {
            part_id: None,
            state: outcome.state.as_str().to_string(),
            reset_all: outcome.reset_all,
            dispatch: Some(dispatch_to_dto(outcome.report)),
        }),
        Err(err) => control_error(err),
    }
}
