#![allow(dead_code)]

use binlight_storage::{
    BinRecord, BinStore, ControllerRecord, ControllerStore, InMemoryInventory, PartLocationRecord,
    PartLocationStore, PartRecord, PartStore,
};
use binlight_wled::{LedTransport, TransportError, WledState};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// 记录所有下发；`failing` 中的地址返回 503。
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(String, WledState)>>,
    failing: HashSet<String>,
}

impl RecordingTransport {
    pub fn failing(addresses: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: addresses.iter().map(|item| item.to_string()).collect(),
        }
    }

    pub fn sent(&self) -> Vec<(String, WledState)> {
        self.sent.lock().expect("lock").clone()
    }

    /// 按下发顺序展开成 (ip, segment, led, hex)。
    pub fn flattened(&self) -> Vec<(String, i32, i32, String)> {
        let mut items = Vec::new();
        for (ip, state) in self.sent() {
            for segment in state.segments {
                for (index, color) in segment.leds {
                    items.push((ip.clone(), segment.id, index, color.to_hex()));
                }
            }
        }
        items
    }
}

#[async_trait::async_trait]
impl LedTransport for RecordingTransport {
    async fn send_command(&self, address: &str, state: &WledState) -> Result<(), TransportError> {
        self.sent
            .lock()
            .expect("lock")
            .push((address.to_string(), state.clone()));
        if self.failing.contains(address) {
            return Err(TransportError::HttpStatus(503));
        }
        Ok(())
    }

    async fn ping(&self, address: &str) -> bool {
        !self.failing.contains(address)
    }
}

pub struct Fixture {
    pub store: Arc<InMemoryInventory>,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryInventory::new());
        for (id, name, ip) in [("ctrl-1", "Rack A", "10.0.0.1"), ("ctrl-2", "Rack B", "10.0.0.2")] {
            store
                .create_controller(ControllerRecord::new(id, name, ip))
                .await
                .expect("controller");
        }
        Self { store }
    }

    pub async fn bin(&self, bin_id: &str, controller_id: &str, segment_id: i32, led_index: i32) {
        self.store
            .create_bin(BinRecord::new(bin_id, bin_id, controller_id, segment_id, led_index))
            .await
            .expect("bin");
    }

    pub async fn part(&self, part_id: &str, min_stock: i64, reorder_point: i64) {
        self.store
            .create_part(PartRecord {
                part_id: part_id.to_string(),
                name: part_id.to_string(),
                min_stock,
                reorder_point,
                stock_tracking_enabled: true,
            })
            .await
            .expect("part");
    }

    pub async fn stock(&self, location_id: &str, part_id: &str, bin_id: &str, quantity: i64) {
        self.store
            .create_part_location(PartLocationRecord {
                location_id: location_id.to_string(),
                part_id: part_id.to_string(),
                bin_id: bin_id.to_string(),
                quantity,
            })
            .await
            .expect("location");
    }
}
