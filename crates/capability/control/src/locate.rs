//! 定位状态机。
//!
//! 服务端不保存每个零件的定位状态：每次请求根据下发结果返回
//! `Started` / `Stopped`，由调用方决定如何展示。
//! 同一零件的并发定位/熄灭不加锁，最后完成的下发生效。

use crate::ControlError;
use crate::batch::LedBatch;
use crate::dispatch::{DispatchReport, FanOutDispatcher};
use crate::resolver::{AddressResolver, ResolveMode};
use binlight_telemetry::{record_locate_failure, record_locate_request};
use domain::Color;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateState {
    Started,
    Stopped,
}

impl LocateState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocateState::Started => "started",
            LocateState::Stopped => "stopped",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocateOutcome {
    pub state: LocateState,
    pub report: DispatchReport,
}

/// 全部熄灭的结果；`reset_all` 通知调用方把所有零件的定位状态复位。
#[derive(Debug, Clone)]
pub struct StopAllOutcome {
    pub state: LocateState,
    pub reset_all: bool,
    pub report: DispatchReport,
}

#[derive(Clone)]
pub struct LocateService {
    resolver: AddressResolver,
    dispatcher: FanOutDispatcher,
}

impl LocateService {
    pub fn new(resolver: AddressResolver, dispatcher: FanOutDispatcher) -> Self {
        Self {
            resolver,
            dispatcher,
        }
    }

    /// 点亮零件所在的料格。
    ///
    /// 任一控制器下发失败返回 `Stopped`；没有可点亮的料格时仍返回 `Started`。
    pub async fn locate(&self, part_id: &str) -> Result<LocateOutcome, ControlError> {
        record_locate_request();
        let addresses = self
            .resolver
            .resolve_for_part(part_id, ResolveMode::Locate)
            .await?;
        let batch = LedBatch::uniform(&addresses, Color::LOCATE);
        let report = self.dispatcher.dispatch(&batch).await;
        let state = if report.all_succeeded() {
            LocateState::Started
        } else {
            record_locate_failure();
            warn!(
                target: "binlight.control",
                part_id,
                failed = report.failed.len(),
                "locate_failed"
            );
            LocateState::Stopped
        };
        info!(
            target: "binlight.control",
            part_id,
            bins = addresses.len(),
            state = state.as_str(),
            "locate_finished"
        );
        Ok(LocateOutcome { state, report })
    }

    /// 熄灭零件关联过的全部料格；下发失败也返回 `Stopped`。
    pub async fn stop(&self, part_id: &str) -> Result<LocateOutcome, ControlError> {
        let addresses = self
            .resolver
            .resolve_for_part(part_id, ResolveMode::Stop)
            .await?;
        let batch = LedBatch::uniform(&addresses, Color::OFF);
        let report = self.dispatcher.dispatch(&batch).await;
        info!(
            target: "binlight.control",
            part_id,
            bins = addresses.len(),
            failed = report.failed.len(),
            "locate_stopped"
        );
        Ok(LocateOutcome {
            state: LocateState::Stopped,
            report,
        })
    }

    /// 熄灭系统中的所有料格。
    pub async fn stop_all(&self) -> Result<StopAllOutcome, ControlError> {
        let addresses = self.resolver.resolve_all().await?;
        let batch = LedBatch::uniform(&addresses, Color::OFF);
        let report = self.dispatcher.dispatch(&batch).await;
        info!(
            target: "binlight.control",
            bins = addresses.len(),
            failed = report.failed.len(),
            "locate_stopped_all"
        );
        Ok(StopAllOutcome {
            state: LocateState::Stopped,
            reset_all: true,
            report,
        })
    }

    /// 初始按钮状态：服务端不跟踪定位状态，总是 `Stopped`。
    pub fn locate_state_for(&self, _part_id: &str) -> LocateState {
        LocateState::Stopped
    }
}
