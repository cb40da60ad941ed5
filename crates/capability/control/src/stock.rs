//! 库存看板点灯。

use crate::ControlError;
use crate::batch::{LedBatch, batch};
use crate::classify::{StatusFilter, classify};
use crate::dispatch::{DispatchReport, FanOutDispatcher};
use crate::resolver::AddressResolver;
use binlight_storage::AddressQuery;
use domain::Color;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct StockStatusReport {
    pub filter: StatusFilter,
    /// 通过过滤并被点亮的看板行数。
    pub lit_count: usize,
    pub clear: DispatchReport,
    pub light: DispatchReport,
}

impl StockStatusReport {
    pub fn message(&self) -> String {
        format!("Lit {} bins", self.lit_count)
    }
}

#[derive(Clone)]
pub struct StockStatusService {
    query: Arc<dyn AddressQuery>,
    resolver: AddressResolver,
    dispatcher: FanOutDispatcher,
}

impl StockStatusService {
    pub fn new(
        query: Arc<dyn AddressQuery>,
        resolver: AddressResolver,
        dispatcher: FanOutDispatcher,
    ) -> Self {
        Self {
            query,
            resolver,
            dispatcher,
        }
    }

    /// 先熄灭全部料格，再按库存等级点亮通过过滤的料格。
    ///
    /// 存储错误中断流程；下发失败只体现在报告中。
    pub async fn show_stock_status(
        &self,
        filter: StatusFilter,
    ) -> Result<StockStatusReport, ControlError> {
        let all = self.resolver.resolve_all().await?;
        let clear = self
            .dispatcher
            .dispatch(&LedBatch::uniform(&all, Color::OFF))
            .await;

        let rows = self.query.dashboard_rows().await?;
        let lit: Vec<_> = rows
            .into_iter()
            .filter_map(|row| {
                let level = classify(row.quantity, row.min_stock, row.reorder_point);
                filter
                    .includes(level)
                    .then(|| (row.address, level.color()))
            })
            .collect();
        let lit_count = lit.len();
        let light = self.dispatcher.dispatch(&batch(lit)).await;

        info!(
            target: "binlight.control",
            filter = filter.as_str(),
            lit = lit_count,
            failed = clear.failed.len() + light.failed.len(),
            "stock_status_shown"
        );
        Ok(StockStatusReport {
            filter,
            lit_count,
            clear,
            light,
        })
    }
}
