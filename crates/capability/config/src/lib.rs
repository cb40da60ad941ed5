//! 应用运行配置加载。

use std::env;
use std::time::Duration;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    /// 未配置时使用内存存储（演示/测试）。
    pub database_url: Option<String>,
    pub health_interval_seconds: u64,
    pub cleanup_interval_seconds: u64,
    pub ping_timeout_ms: u64,
    pub command_timeout_ms: u64,
    /// 是否启动健康巡检与标签清理后台任务。
    pub background_enabled: bool,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr =
            env::var("BINLIGHT_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let database_url = read_optional("BINLIGHT_DATABASE_URL");
        let health_interval_seconds =
            read_positive_u64_with_default("BINLIGHT_HEALTH_INTERVAL_SECONDS", 60)?;
        let cleanup_interval_seconds =
            read_positive_u64_with_default("BINLIGHT_CLEANUP_INTERVAL_SECONDS", 6 * 60 * 60)?;
        let ping_timeout_ms = read_positive_u64_with_default("BINLIGHT_PING_TIMEOUT_MS", 2000)?;
        let command_timeout_ms =
            read_positive_u64_with_default("BINLIGHT_COMMAND_TIMEOUT_MS", 5000)?;
        let background_enabled = read_bool_with_default("BINLIGHT_BACKGROUND", true);

        Ok(Self {
            http_addr,
            database_url,
            health_interval_seconds,
            cleanup_interval_seconds,
            ping_timeout_ms,
            command_timeout_ms,
            background_enabled,
        })
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_seconds)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds)
    }

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_timeout_ms)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

/// 读取正整数环境变量；0 视为非法（定时器与超时都不允许为 0）。
fn read_positive_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    match value.trim().parse::<u64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
