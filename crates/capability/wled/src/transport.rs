//! 设备传输抽象

use crate::error::TransportError;
use crate::state::WledState;
use async_trait::async_trait;

/// 控制器传输接口
///
/// `address` 为控制器的 IP 或 `host:port`。
#[async_trait]
pub trait LedTransport: Send + Sync {
    /// 下发状态；超时、连接失败与非 2xx 都返回错误，不做重试。
    async fn send_command(&self, address: &str, state: &WledState) -> Result<(), TransportError>;

    /// 探活：仅当控制器返回 HTTP 200 时为 true。
    async fn ping(&self, address: &str) -> bool;
}
