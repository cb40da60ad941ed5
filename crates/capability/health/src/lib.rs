//! # 控制器健康巡检
//!
//! 两个互相独立的定时任务：
//!
//! - 在线巡检（默认 60 秒）：逐个探活控制器，写回 `online/offline`
//! - 标签清理（默认 6 小时）：删除没有任何零件引用的分类
//!
//! 两个任务启动时各立即执行一次，之后每个周期把本次巡检 `spawn` 为独立任务，
//! 单次巡检耗时过长不会推迟下一次触发。

use binlight_storage::{CategoryStore, ControllerRecord, ControllerStore, StorageError};
use binlight_wled::LedTransport;
use domain::{ControllerStatus, now_epoch_ms};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// 时间来源（epoch 毫秒），测试中可替换为固定值。
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// 一次在线巡检的汇总。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub online: usize,
    pub offline: usize,
    /// 写回状态失败的控制器数（不影响其他控制器）。
    pub update_failures: usize,
}

#[derive(Clone)]
pub struct HealthMonitor {
    controllers: Arc<dyn ControllerStore>,
    categories: Arc<dyn CategoryStore>,
    transport: Arc<dyn LedTransport>,
    clock: Clock,
}

impl HealthMonitor {
    pub fn new(
        controllers: Arc<dyn ControllerStore>,
        categories: Arc<dyn CategoryStore>,
        transport: Arc<dyn LedTransport>,
    ) -> Self {
        Self {
            controllers,
            categories,
            transport,
            clock: Arc::new(now_epoch_ms),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// 探活全部控制器并写回状态。
    ///
    /// 探活成功：`online` + `last_seen = now`；失败：`offline`，`last_seen` 保持不变。
    pub async fn run_liveness_sweep(&self) -> Result<SweepReport, StorageError> {
        let controllers = self.controllers.list_controllers().await?;
        let probes = controllers
            .iter()
            .map(|controller| self.probe(controller));
        let results = join_all(probes).await;

        let mut report = SweepReport::default();
        for (online, updated) in results {
            if online {
                report.online += 1;
            } else {
                report.offline += 1;
            }
            if !updated {
                report.update_failures += 1;
            }
        }
        binlight_telemetry::record_health_sweep(report.online as u64, report.offline as u64);
        tracing::info!(
            target: "binlight.health",
            controllers = controllers.len(),
            online = report.online,
            offline = report.offline,
            update_failures = report.update_failures,
            "health_sweep_finished"
        );
        Ok(report)
    }

    /// 删除没有零件引用的分类，返回删除数量。
    pub async fn run_cleanup_sweep(&self) -> Result<u64, StorageError> {
        match self.categories.cleanup_orphaned_categories().await {
            Ok(deleted) => {
                binlight_telemetry::record_cleanup(deleted);
                tracing::info!(
                    target: "binlight.health",
                    deleted,
                    "category_cleanup_finished"
                );
                Ok(deleted)
            }
            Err(err) => {
                binlight_telemetry::record_cleanup_failure();
                tracing::warn!(
                    target: "binlight.health",
                    error = %err,
                    "category_cleanup_failed"
                );
                Err(err)
            }
        }
    }

    /// 手动刷新单个控制器状态；控制器不存在时返回 `None`。
    pub async fn refresh_controller(
        &self,
        controller_id: &str,
    ) -> Result<Option<ControllerRecord>, StorageError> {
        let Some(controller) = self.controllers.find_controller(controller_id).await? else {
            return Ok(None);
        };
        let online = self.transport.ping(&controller.ip_address).await;
        let (status, last_seen) = self.status_for(online);
        self.controllers
            .update_controller_status(controller_id, status, last_seen)
            .await?;
        self.controllers.find_controller(controller_id).await
    }

    /// 启动两个定时任务，返回 (在线巡检, 标签清理) 的句柄。
    pub fn spawn(
        &self,
        health_interval: Duration,
        cleanup_interval: Duration,
    ) -> (JoinHandle<()>, JoinHandle<()>) {
        let liveness = {
            let monitor = self.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(health_interval);
                loop {
                    interval.tick().await;
                    let monitor = monitor.clone();
                    tokio::spawn(async move {
                        if let Err(err) = monitor.run_liveness_sweep().await {
                            tracing::warn!(
                                target: "binlight.health",
                                error = %err,
                                "health_sweep_failed"
                            );
                        }
                    });
                }
            })
        };
        let cleanup = {
            let monitor = self.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(cleanup_interval);
                loop {
                    interval.tick().await;
                    let monitor = monitor.clone();
                    tokio::spawn(async move {
                        // 失败已在 run_cleanup_sweep 内记录
                        let _ = monitor.run_cleanup_sweep().await;
                    });
                }
            })
        };
        tracing::info!(
            target: "binlight.health",
            health_interval_secs = health_interval.as_secs(),
            cleanup_interval_secs = cleanup_interval.as_secs(),
            "health_schedulers_started"
        );
        (liveness, cleanup)
    }

    /// 返回 (是否在线, 是否写回成功)。
    async fn probe(&self, controller: &ControllerRecord) -> (bool, bool) {
        let online = self.transport.ping(&controller.ip_address).await;
        let (status, last_seen) = self.status_for(online);
        let updated = match self
            .controllers
            .update_controller_status(&controller.controller_id, status, last_seen)
            .await
        {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(
                    target: "binlight.health",
                    controller_id = %controller.controller_id,
                    error = %err,
                    "controller_status_update_failed"
                );
                false
            }
        };
        if !online {
            tracing::debug!(
                target: "binlight.health",
                controller_id = %controller.controller_id,
                ip = %controller.ip_address,
                "controller_offline"
            );
        }
        (online, updated)
    }

    fn status_for(&self, online: bool) -> (ControllerStatus, Option<i64>) {
        if online {
            (ControllerStatus::Online, Some((self.clock)()))
        } else {
            (ControllerStatus::Offline, None)
        }
    }
}
