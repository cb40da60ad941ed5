//! 基于 reqwest 的 WLED 客户端

use crate::error::TransportError;
use crate::state::WledState;
use crate::transport::LedTransport;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// 默认探活超时。
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_secs(2);
/// 默认下发超时。
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct WledClient {
    client: reqwest::Client,
    ping_timeout: Duration,
    command_timeout: Duration,
}

impl WledClient {
    pub fn new(ping_timeout: Duration, command_timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            ping_timeout,
            command_timeout,
        })
    }

    pub fn with_default_timeouts() -> Result<Self, TransportError> {
        Self::new(DEFAULT_PING_TIMEOUT, DEFAULT_COMMAND_TIMEOUT)
    }

    fn url(address: &str, path: &str) -> String {
        format!("http://{}{}", address.trim_end_matches('/'), path)
    }
}

#[async_trait::async_trait]
impl LedTransport for WledClient {
    async fn send_command(&self, address: &str, state: &WledState) -> Result<(), TransportError> {
        if state.segments.is_empty() {
            return Err(TransportError::Payload("state has no segments".to_string()));
        }
        let response = self
            .client
            .post(Self::url(address, "/json/state"))
            .timeout(self.command_timeout)
            .json(state)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus(status.as_u16()));
        }
        debug!(
            target: "binlight.wled",
            address,
            leds = state.led_count(),
            "wled_state_sent"
        );
        Ok(())
    }

    async fn ping(&self, address: &str) -> bool {
        let result = self
            .client
            .get(Self::url(address, "/json/info"))
            .timeout(self.ping_timeout)
            .send()
            .await;
        match result {
            Ok(response) => response.status() == StatusCode::OK,
            Err(err) => {
                debug!(target: "binlight.wled", address, error = %err, "wled_ping_failed");
                false
            }
        }
    }
}
