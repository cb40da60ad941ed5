//! 按控制器合并灯光命令。
//!
//! 同一控制器的所有 segment 合并进一次请求；segment 内保持输入顺序，
//! 重复的 LED 序号原样保留（设备按顺序处理，后者生效）。

use binlight_wled::{WledSegment, WledState};
use domain::{Color, LedAddress};
use std::collections::BTreeMap;

/// 单个控制器的待下发内容：segment → [(led_index, color)]。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerPayload {
    segments: BTreeMap<i32, Vec<(i32, Color)>>,
}

impl ControllerPayload {
    pub fn push(&mut self, segment_id: i32, led_index: i32, color: Color) {
        self.segments
            .entry(segment_id)
            .or_default()
            .push((led_index, color));
    }

    pub fn segments(&self) -> impl Iterator<Item = (i32, &[(i32, Color)])> {
        self.segments
            .iter()
            .map(|(segment_id, leds)| (*segment_id, leds.as_slice()))
    }

    pub fn entry_count(&self) -> usize {
        self.segments.values().map(Vec::len).sum()
    }

    pub fn to_state(&self) -> WledState {
        WledState::new(
            self.segments
                .iter()
                .map(|(segment_id, leds)| WledSegment::new(*segment_id, leds.clone()))
                .collect(),
        )
    }
}

/// 按 IP 分组的命令批次。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedBatch {
    controllers: BTreeMap<String, ControllerPayload>,
}

impl LedBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有地址使用同一颜色。
    pub fn uniform<'a>(addresses: impl IntoIterator<Item = &'a LedAddress>, color: Color) -> Self {
        batch(addresses.into_iter().map(|address| (address.clone(), color)))
    }

    pub fn push(&mut self, address: LedAddress, color: Color) {
        self.controllers
            .entry(address.ip)
            .or_default()
            .push(address.segment_id, address.led_index, color);
    }

    pub fn payload(&self, ip: &str) -> Option<&ControllerPayload> {
        self.controllers.get(ip)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ControllerPayload)> {
        self.controllers
            .iter()
            .map(|(ip, payload)| (ip.as_str(), payload))
    }

    pub fn controller_count(&self) -> usize {
        self.controllers.len()
    }

    /// 批次内的条目总数，等于输入条目数。
    pub fn entry_count(&self) -> usize {
        self.controllers
            .values()
            .map(ControllerPayload::entry_count)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

/// 合并 (地址, 颜色) 条目。
pub fn batch(entries: impl IntoIterator<Item = (LedAddress, Color)>) -> LedBatch {
    let mut batch = LedBatch::new();
    for (address, color) in entries {
        batch.push(address, color);
    }
    batch
}
