//! 传输错误类型定义

/// 控制器通信错误
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// 请求失败（连接、DNS、超时等）
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// 控制器返回非 2xx 状态码
    #[error("controller returned HTTP {0}")]
    HttpStatus(u16),

    /// 报文无效（例如没有任何 segment）
    #[error("invalid payload: {0}")]
    Payload(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Request(err) if err.is_timeout())
    }
}
