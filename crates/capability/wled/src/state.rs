//! WLED 状态报文

use domain::Color;
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

/// 下发给单个控制器的完整状态。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WledState {
    #[serde(rename = "seg")]
    pub segments: Vec<WledSegment>,
}

impl WledState {
    pub fn new(segments: Vec<WledSegment>) -> Self {
        Self { segments }
    }

    /// 报文中寻址的 LED 总数。
    pub fn led_count(&self) -> usize {
        self.segments.iter().map(|segment| segment.leds.len()).sum()
    }
}

/// 单个 segment 的逐灯设置，序列化为 `{"id":..,"on":..,"i":[idx,"RRGGBB",..]}`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WledSegment {
    pub id: i32,
    pub on: bool,
    pub leds: Vec<(i32, Color)>,
}

impl WledSegment {
    pub fn new(id: i32, leds: Vec<(i32, Color)>) -> Self {
        Self { id, on: true, leds }
    }
}

impl Serialize for WledSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut segment = serializer.serialize_struct("WledSegment", 3)?;
        segment.serialize_field("id", &self.id)?;
        segment.serialize_field("on", &self.on)?;
        segment.serialize_field("i", &FlatLeds(&self.leds))?;
        segment.end()
    }
}

struct FlatLeds<'a>(&'a [(i32, Color)]);

impl Serialize for FlatLeds<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len() * 2))?;
        for (index, color) in self.0 {
            seq.serialize_element(index)?;
            seq.serialize_element(&color.to_hex())?;
        }
        seq.end()
    }
}
