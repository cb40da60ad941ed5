//! 追踪、请求 ID 生成与基础指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub commands_sent: u64,
    pub commands_succeeded: u64,
    pub commands_failed: u64,
    pub leds_addressed: u64,
    pub locate_requests: u64,
    pub locate_failures: u64,
    pub health_sweeps: u64,
    pub pings_online: u64,
    pub pings_offline: u64,
    pub cleanup_runs: u64,
    pub cleanup_failures: u64,
    pub categories_deleted: u64,
}

/// 进程级计数器。
pub struct TelemetryMetrics {
    commands_sent: AtomicU64,
    commands_succeeded: AtomicU64,
    commands_failed: AtomicU64,
    leds_addressed: AtomicU64,
    locate_requests: AtomicU64,
    locate_failures: AtomicU64,
    health_sweeps: AtomicU64,
    pings_online: AtomicU64,
    pings_offline: AtomicU64,
    cleanup_runs: AtomicU64,
    cleanup_failures: AtomicU64,
    categories_deleted: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            commands_sent: AtomicU64::new(0),
            commands_succeeded: AtomicU64::new(0),
            commands_failed: AtomicU64::new(0),
            leds_addressed: AtomicU64::new(0),
            locate_requests: AtomicU64::new(0),
            locate_failures: AtomicU64::new(0),
            health_sweeps: AtomicU64::new(0),
            pings_online: AtomicU64::new(0),
            pings_offline: AtomicU64::new(0),
            cleanup_runs: AtomicU64::new(0),
            cleanup_failures: AtomicU64::new(0),
            categories_deleted: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            commands_sent: self.commands_sent.load(Ordering::Relaxed),
            commands_succeeded: self.commands_succeeded.load(Ordering::Relaxed),
            commands_failed: self.commands_failed.load(Ordering::Relaxed),
            leds_addressed: self.leds_addressed.load(Ordering::Relaxed),
            locate_requests: self.locate_requests.load(Ordering::Relaxed),
            locate_failures: self.locate_failures.load(Ordering::Relaxed),
            health_sweeps: self.health_sweeps.load(Ordering::Relaxed),
            pings_online: self.pings_online.load(Ordering::Relaxed),
            pings_offline: self.pings_offline.load(Ordering::Relaxed),
            cleanup_runs: self.cleanup_runs.load(Ordering::Relaxed),
            cleanup_failures: self.cleanup_failures.load(Ordering::Relaxed),
            categories_deleted: self.categories_deleted.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录一次控制器命令下发（含本次寻址的 LED 数）。
pub fn record_command_sent(leds: u64) {
    let metrics = metrics();
    metrics.commands_sent.fetch_add(1, Ordering::Relaxed);
    metrics.leds_addressed.fetch_add(leds, Ordering::Relaxed);
}

/// 记录命令下发成功次数。
pub fn record_command_succeeded() {
    metrics().commands_succeeded.fetch_add(1, Ordering::Relaxed);
}

/// 记录命令下发失败次数（超时、连接失败、非 2xx）。
pub fn record_command_failed() {
    metrics().commands_failed.fetch_add(1, Ordering::Relaxed);
}

pub fn record_locate_request() {
    metrics().locate_requests.fetch_add(1, Ordering::Relaxed);
}

/// 记录定位失败（至少一个控制器下发失败）。
pub fn record_locate_failure() {
    metrics().locate_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录一轮健康巡检结果。
pub fn record_health_sweep(online: u64, offline: u64) {
    let metrics = metrics();
    metrics.health_sweeps.fetch_add(1, Ordering::Relaxed);
    metrics.pings_online.fetch_add(online, Ordering::Relaxed);
    metrics.pings_offline.fetch_add(offline, Ordering::Relaxed);
}

/// 记录一次标签清理成功及删除数量。
pub fn record_cleanup(deleted: u64) {
    let metrics = metrics();
    metrics.cleanup_runs.fetch_add(1, Ordering::Relaxed);
    metrics
        .categories_deleted
        .fetch_add(deleted, Ordering::Relaxed);
}

pub fn record_cleanup_failure() {
    metrics().cleanup_failures.fetch_add(1, Ordering::Relaxed);
}
