//! 网络选择
//!
//! 根据配置与执行选项确定目标网络和节点地址

use crate::cli::options::ExecutionOptions;
use crate::config::CliConfig;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// 目标网络
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    /// 主网
    Mainnet,
    /// 公共测试网
    Testnet,
    /// 本地集成测试网络
    Regtest,
}

impl NetworkKind {
    /// 由执行选项确定网络，`-i` 优先于 `-t`
    pub fn from_options(options: &ExecutionOptions) -> Self {
        if options.integration_test {
            Self::Regtest
        } else if options.testnet {
            Self::Testnet
        } else {
            Self::Mainnet
        }
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkKind::Mainnet => write!(f, "mainnet"),
            NetworkKind::Testnet => write!(f, "testnet"),
            NetworkKind::Regtest => write!(f, "regtest"),
        }
    }
}

/// 解析后的网络设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSettings {
    /// 目标网络
    pub kind: NetworkKind,
    /// 节点 API 地址，不带结尾斜杠
    pub api_url: String,
    /// 交易广播服务地址，不带结尾斜杠
    pub broadcast_url: String,
    /// 请求超时时间
    pub timeout: Duration,
}

impl NetworkSettings {
    /// 合并配置与执行选项
    ///
    /// `-H` / `-T` 覆盖配置中的地址；未覆盖时测试网络使用 `testnet_api_url`。
    pub fn resolve(config: &CliConfig, options: &ExecutionOptions) -> Self {
        let kind = NetworkKind::from_options(options);

        let api_url = match (&options.api_url, kind) {
            (Some(url), _) => url,
            (None, NetworkKind::Mainnet) => &config.api_url,
            (None, NetworkKind::Testnet | NetworkKind::Regtest) => &config.testnet_api_url,
        };

        let broadcast_url = options
            .broadcaster_url
            .as_ref()
            .unwrap_or(&config.broadcast_service_url);

        Self {
            kind,
            api_url: api_url.trim_end_matches('/').to_string(),
            broadcast_url: broadcast_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.request_timeout_seconds),
        }
    }
}
