//! 仪表盘运行参数：端点、轮询周期、请求超时、历史窗口大小。

use crate::error::{DashboardError, Result};
use std::time::Duration;
use url::Url;

/// 默认指标端点
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/metrics";
/// 默认轮询周期 (ms)
pub const DEFAULT_INTERVAL_MS: u64 = 2000;
/// 默认单次请求超时 (ms)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
/// 默认保留的样本数
pub const DEFAULT_HISTORY: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub endpoint: Url,
    pub interval: Duration,
    pub timeout: Duration,
    pub history: usize,
}

impl DashboardConfig {
    /// 校验并构建配置：端点必须是 http(s)，周期/超时/窗口必须大于 0。
    pub fn new(endpoint: &str, interval_ms: u64, timeout_ms: u64, history: usize) -> Result<Self> {
        let endpoint = Url::parse(endpoint.trim())?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(DashboardError::InvalidConfig(format!(
                "endpoint must use http or https, got '{}'",
                endpoint.scheme()
            )));
        }
        if interval_ms == 0 {
            return Err(DashboardError::InvalidConfig(
                "poll interval must be greater than 0".into(),
            ));
        }
        if timeout_ms == 0 {
            return Err(DashboardError::InvalidConfig(
                "request timeout must be greater than 0".into(),
            ));
        }
        if history == 0 {
            return Err(DashboardError::InvalidConfig(
                "history size must be greater than 0".into(),
            ));
        }
        Ok(Self {
            endpoint,
            interval: Duration::from_millis(interval_ms),
            timeout: Duration::from_millis(timeout_ms),
            history,
        })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("valid default endpoint"),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            history: DEFAULT_HISTORY,
        }
    }
}
