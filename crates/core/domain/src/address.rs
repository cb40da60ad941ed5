//! 物理地址与灯光颜色。
//!
//! 一个料格（bin）对应灯带控制器上的一颗 LED，其物理地址由
//! `(控制器 IP, segment_id, led_index)` 唯一确定。该地址只在一次
//! 解析/下发周期内存在，不做持久化。

use std::str::FromStr;

/// LED 物理地址。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LedAddress {
    pub ip: String,
    pub segment_id: i32,
    pub led_index: i32,
}

impl LedAddress {
    pub fn new(ip: impl Into<String>, segment_id: i32, led_index: i32) -> Self {
        Self {
            ip: ip.into(),
            segment_id,
            led_index,
        }
    }
}

/// 24 位 RGB 颜色。
///
/// 下发给设备时编码为 6 位大写十六进制（不带 `#`），例如 `FF0000`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// 库存告急（红）。
    pub const CRITICAL: Color = Color(0xFF0000);
    /// 需要关注（黄）。
    pub const ATTENTION: Color = Color(0xFFFF00);
    /// 库存充足（绿）。
    pub const OK: Color = Color(0x00FF00);
    /// 定位高亮（红）。
    pub const LOCATE: Color = Color(0xFF0000);
    /// 熄灭。
    pub const OFF: Color = Color(0x000000);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }

    pub fn to_hex(&self) -> String {
        format!("{:06X}", self.0 & 0xFF_FFFF)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// 颜色解析错误。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(String);

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid color: {}", self.0)
    }
}

impl std::error::Error for ColorParseError {}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(value.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Color)
            .map_err(|_| ColorParseError(value.to_string()))
    }
}
