//! Telemetry 指标快照。
//!
//! - GET /metrics

use crate::utils::response::ok;
use api_contract::MetricsSnapshotDto;
use axum::response::Response;
use binlight_telemetry::metrics;

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    ok(MetricsSnapshotDto {
        commands_sent: snapshot.commands_sent,
        commands_succeeded: snapshot.commands_succeeded,
        commands_failed: snapshot.commands_failed,
        leds_addressed: snapshot.leds_addressed,
        locate_requests: snapshot.locate_requests,
        locate_failures: snapshot.locate_failures,
        health_sweeps: snapshot.health_sweeps,
        pings_online: snapshot.pings_online,
        pings_offline: snapshot.pings_offline,
        cleanup_runs: snapshot.cleanup_runs,
        cleanup_failures: snapshot.cleanup_failures,
        categories_deleted: snapshot.categories_deleted,
    })
}
