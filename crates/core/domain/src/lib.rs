pub mod address;

pub use address::{Color, ColorParseError, LedAddress};

/// 控制器在线状态（仅由健康巡检写入）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerStatus {
    Unknown,
    Online,
    Offline,
}

impl ControllerStatus {
    /// 存储与接口中使用的字符串形式。
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerStatus::Unknown => "unknown",
            ControllerStatus::Online => "online",
            ControllerStatus::Offline => "offline",
        }
    }

    /// 从存储值解析；无法识别的值视为 `Unknown`。
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "online" => ControllerStatus::Online,
            "offline" => ControllerStatus::Offline,
            _ => ControllerStatus::Unknown,
        }
    }
}

impl Default for ControllerStatus {
    fn default() -> Self {
        ControllerStatus::Unknown
    }
}

impl std::fmt::Display for ControllerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 当前时间（epoch 毫秒）。
pub fn now_epoch_ms() -> i64 {
    let now = std::time::SystemTime::now();
    let duration = now
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_millis() as i64
}
