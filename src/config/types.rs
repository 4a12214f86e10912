//! 配置数据结构定义
//!
//! 定义客户端配置结构体、默认值和验证逻辑

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 客户端配置
///
/// 配置文件中缺失的字段取默认值。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// 主网节点 API 地址
    pub api_url: String,
    /// 测试网节点 API 地址
    pub testnet_api_url: String,
    /// 交易广播服务地址
    pub broadcast_service_url: String,
    /// 请求超时时间（秒）
    pub request_timeout_seconds: u64,
    /// 日志级别
    pub log_level: String,
    /// 日志格式：`text` 或 `json`
    pub log_format: String,
    /// 日志文件路径，未设置时输出到标准错误
    pub log_file: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            testnet_api_url: default_testnet_api_url(),
            broadcast_service_url: default_broadcast_service_url(),
            request_timeout_seconds: default_timeout(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            log_file: None,
        }
    }
}

// 默认值函数
fn default_api_url() -> String {
    "https://core.blockstack.org".to_string()
}
fn default_testnet_api_url() -> String {
    "http://localhost:16268".to_string()
}
fn default_broadcast_service_url() -> String {
    "https://broadcast.blockstack.org".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_config(config: &CliConfig) -> Result<(), String> {
    let urls = [
        ("api_url", &config.api_url),
        ("testnet_api_url", &config.testnet_api_url),
        ("broadcast_service_url", &config.broadcast_service_url),
    ];
    for (field, url) in urls {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("{field} 的URL格式无效: {url}"));
        }
    }

    if config.request_timeout_seconds == 0 {
        return Err("请求超时时间不能为0".to_string());
    }

    let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_log_levels.contains(&config.log_level.as_str()) {
        return Err(format!(
            "无效的日志级别: {}，支持的级别: {:?}",
            config.log_level, valid_log_levels
        ));
    }

    if !["text", "json"].contains(&config.log_format.as_str()) {
        return Err(format!("无效的日志格式: {}，支持 text 或 json", config.log_format));
    }

    Ok(())
}
