//! 扇出下发：每个控制器一次请求，并发执行，互不影响。

use crate::batch::LedBatch;
use binlight_telemetry::{record_command_failed, record_command_sent, record_command_succeeded};
use binlight_wled::LedTransport;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// 单个控制器的下发失败。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedController {
    pub ip: String,
    pub error: String,
}

/// 一次扇出下发的结果。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// 尝试下发的控制器数。
    pub controllers: usize,
    /// 寻址的 LED 条目数。
    pub leds: usize,
    pub failed: Vec<FailedController>,
}

impl DispatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Clone)]
pub struct FanOutDispatcher {
    transport: Arc<dyn LedTransport>,
}

impl FanOutDispatcher {
    pub fn new(transport: Arc<dyn LedTransport>) -> Self {
        Self { transport }
    }

    /// 下发批次；单个控制器失败只记录，不重试，不影响其他控制器。
    pub async fn dispatch(&self, batch: &LedBatch) -> DispatchReport {
        let sends = batch.iter().map(|(ip, payload)| {
            let transport = self.transport.clone();
            let state = payload.to_state();
            async move {
                let leds = state.led_count();
                record_command_sent(leds as u64);
                let result = transport.send_command(ip, &state).await;
                (ip, leds, result)
            }
        });
        let results = join_all(sends).await;

        let mut report = DispatchReport {
            controllers: results.len(),
            ..DispatchReport::default()
        };
        for (ip, leds, result) in results {
            report.leds += leds;
            match result {
                Ok(()) => record_command_succeeded(),
                Err(err) => {
                    record_command_failed();
                    warn!(
                        target: "binlight.control",
                        controller_ip = %ip,
                        leds,
                        error = %err,
                        "led_dispatch_failed"
                    );
                    report.failed.push(FailedController {
                        ip: ip.to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }
        if report.controllers > 0 {
            info!(
                target: "binlight.control",
                controllers = report.controllers,
                leds = report.leds,
                failed = report.failed.len(),
                "led_dispatch_finished"
            );
        }
        report
    }
}
