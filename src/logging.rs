//! 日志系统模块
//!
//! 提供结构化日志配置和管理功能。日志默认输出到标准错误，
//! 标准输出只用于命令结果。

use crate::config::CliConfig;
use log::LevelFilter;
use serde_json::json;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter, Layer};

/// 打开调试日志的环境变量
pub const DEBUG_ENV_VAR: &str = "BLOCKSTACK_CLI_DEBUG";

/// 全局日志初始化状态
#[derive(Debug, Default)]
struct GlobalLoggingState {
    /// 是否已初始化
    initialized: bool,
    /// 初始化结果
    init_result: Option<Result<(), String>>,
}

/// 全局日志状态管理器
static GLOBAL_LOGGING_STATE: OnceLock<Mutex<GlobalLoggingState>> = OnceLock::new();

/// 日志配置结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// 日志级别
    pub level: LevelFilter,
    /// 日志文件路径，`None` 时输出到标准错误
    pub file_path: Option<PathBuf>,
    /// 是否使用JSON格式
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Warn,
            file_path: None,
            json_format: false,
        }
    }
}

impl LogConfig {
    /// 由客户端配置构建日志配置
    ///
    /// 设置了 `BLOCKSTACK_CLI_DEBUG` 时级别提升为 debug。
    pub fn from_config(config: &CliConfig) -> Self {
        let level = if std::env::var_os(DEBUG_ENV_VAR).is_some() {
            LevelFilter::Debug
        } else {
            LevelFilter::from_str(&config.log_level).unwrap_or(LevelFilter::Warn)
        };

        Self {
            level,
            file_path: config.log_file.clone(),
            json_format: config.log_format == "json",
        }
    }
}

/// 将耗时换算为毫秒，超出 `u64` 范围时取最大值
pub fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// 日志系统管理器
pub struct LoggingSystem {
    /// 配置
    config: LogConfig,
}

impl LoggingSystem {
    /// 创建新的日志系统
    pub fn new(config: LogConfig) -> Self {
        Self { config }
    }

    /// 初始化日志系统
    ///
    /// # 参数
    /// * `config` - 日志配置
    ///
    /// # 返回
    /// * `Result<LoggingSystem, anyhow::Error>` - 初始化结果
    ///
    /// 重复调用不会重复安装订阅者。
    pub fn setup_logging(config: LogConfig) -> anyhow::Result<Self> {
        Self::setup_logging_with_options(config, false)
    }

    /// 初始化日志系统（带选项）
    ///
    /// # 参数
    /// * `config` - 日志配置
    /// * `force_reinit` - 是否强制重新初始化（主要用于测试）
    pub fn setup_logging_with_options(
        config: LogConfig,
        force_reinit: bool,
    ) -> anyhow::Result<Self> {
        let state_mutex =
            GLOBAL_LOGGING_STATE.get_or_init(|| Mutex::new(GlobalLoggingState::default()));

        {
            let state = state_mutex
                .lock()
                .map_err(|e| anyhow::anyhow!("日志状态锁异常: {}", e))?;
            if state.initialized && !force_reinit {
                return match &state.init_result {
                    Some(Err(e)) => Err(anyhow::anyhow!("日志系统之前初始化失败: {}", e)),
                    _ => Ok(Self::new(config)),
                };
            }
        }

        let init_result = Self::perform_initialization(&config);

        {
            let mut state = state_mutex
                .lock()
                .map_err(|e| anyhow::anyhow!("日志状态锁异常: {}", e))?;
            state.initialized = true;
            state.init_result = Some(init_result.as_ref().map(|_| ()).map_err(|e| e.to_string()));
        }

        init_result?;
        Ok(Self::new(config))
    }

    /// 执行实际的日志系统初始化
    fn perform_initialization(config: &LogConfig) -> anyhow::Result<()> {
        // log crate 到 tracing 的桥接
        Self::init_log_tracer()?;
        Self::init_tracing_subscriber(config)
    }

    /// 初始化 LogTracer
    fn init_log_tracer() -> anyhow::Result<()> {
        use tracing_log::LogTracer;

        static LOG_TRACER_INIT: OnceLock<Result<(), String>> = OnceLock::new();

        let result = LOG_TRACER_INIT.get_or_init(|| LogTracer::init().map_err(|e| e.to_string()));

        result
            .as_ref()
            .map_err(|e| anyhow::anyhow!("LogTracer初始化失败: {}", e))?;
        Ok(())
    }

    /// 初始化 tracing subscriber
    fn init_tracing_subscriber(config: &LogConfig) -> anyhow::Result<()> {
        let env_filter = EnvFilter::from_default_env()
            .add_directive(Self::convert_level_to_directive(config.level));
        let timer = fmt::time::ChronoUtc::rfc_3339();

        let fmt_layer = match &config.file_path {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| anyhow::anyhow!("打开日志文件失败 {}: {}", path.display(), e))?;
                let layer = fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_timer(timer)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true);
                if config.json_format {
                    layer.json().boxed()
                } else {
                    layer.boxed()
                }
            }
            None if config.json_format => fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_timer(timer)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
            None => fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(timer)
                .with_ansi(true)
                .with_target(false)
                .boxed(),
        };

        match registry().with(env_filter).with(fmt_layer).try_init() {
            Ok(()) => {
                tracing::debug!("日志系统初始化完成: {:?}", config);
                Ok(())
            }
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains(
                    "attempted to set a logger after the logging system was already initialized",
                ) || error_msg.contains("a global default trace dispatcher has already been set")
                {
                    // 已经初始化过了
                    tracing::debug!("日志系统已经初始化过了");
                    Ok(())
                } else {
                    Err(anyhow::anyhow!(
                        "tracing subscriber初始化失败: {}",
                        error_msg
                    ))
                }
            }
        }
    }

    /// 将 log::LevelFilter 转换为 tracing 的指令
    fn convert_level_to_directive(level: LevelFilter) -> tracing_subscriber::filter::Directive {
        use tracing_subscriber::filter::{Directive, LevelFilter as TracingLevel};
        match level {
            LevelFilter::Off => Directive::from(TracingLevel::OFF),
            LevelFilter::Error => Directive::from(tracing::Level::ERROR),
            LevelFilter::Warn => Directive::from(tracing::Level::WARN),
            LevelFilter::Info => Directive::from(tracing::Level::INFO),
            LevelFilter::Debug => Directive::from(tracing::Level::DEBUG),
            LevelFilter::Trace => Directive::from(tracing::Level::TRACE),
        }
    }

    /// 重置日志系统状态（主要用于测试）
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state_mutex) = GLOBAL_LOGGING_STATE.get() {
            if let Ok(mut state) = state_mutex.lock() {
                *state = GlobalLoggingState::default();
            }
        }
    }

    /// 记录命令执行日志
    ///
    /// # 参数
    /// * `command` - 命令名称
    /// * `success` - 是否成功
    /// * `elapsed` - 耗时
    /// * `details` - 附加信息
    pub fn command_log(&self, command: &str, success: bool, elapsed: Duration, details: Option<&str>) {
        if self.config.json_format {
            let entry = json!({
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "type": "command",
                "command": command,
                "success": success,
                "duration_ms": duration_ms(elapsed),
                "details": details.unwrap_or(""),
            });
            tracing::info!("{entry}");
        } else {
            tracing::info!(
                "COMMAND: {} - {}ms ({}) {}",
                command,
                duration_ms(elapsed),
                if success { "SUCCESS" } else { "FAILED" },
                details.unwrap_or("")
            );
        }
    }
}

// ===================== 日志系统测试模块 =====================

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::NamedTempFile;

    /// 创建测试用的日志配置
    fn create_test_config() -> LogConfig {
        LogConfig {
            level: LevelFilter::Info,
            ..Default::default()
        }
    }

    #[test]
    #[serial]
    fn test_logging_system_single_initialization() {
        LoggingSystem::reset_for_testing();

        let config = create_test_config();

        // 第一次初始化应该成功
        let result1 = LoggingSystem::setup_logging(config.clone());
        assert!(result1.is_ok());

        // 第二次初始化不会重复安装订阅者
        let result2 = LoggingSystem::setup_logging(config);
        assert!(result2.is_ok());
    }

    #[test]
    #[serial]
    fn test_logging_system_force_reinit() {
        LoggingSystem::reset_for_testing();

        let config = create_test_config();
        let _system = LoggingSystem::setup_logging(config.clone()).unwrap();

        let result = LoggingSystem::setup_logging_with_options(config, true);
        assert!(result.is_ok());
    }

    #[test]
    #[serial]
    fn test_logging_system_with_file_output() {
        LoggingSystem::reset_for_testing();

        let temp_file = NamedTempFile::new().unwrap();
        let mut config = create_test_config();
        config.file_path = Some(temp_file.path().to_path_buf());

        assert!(LoggingSystem::setup_logging(config).is_ok());
    }

    #[test]
    #[serial]
    fn test_logging_system_with_json_format() {
        LoggingSystem::reset_for_testing();

        let mut config = create_test_config();
        config.json_format = true;

        let system = LoggingSystem::setup_logging(config).unwrap();
        system.command_log("whois", true, Duration::from_millis(12), Some("alice.id"));
    }

    #[test]
    fn test_duration_ms_saturates() {
        assert_eq!(duration_ms(Duration::from_millis(1500)), 1500);
        assert_eq!(duration_ms(Duration::from_micros(999)), 0);
        assert_eq!(duration_ms(Duration::MAX), u64::MAX);
    }

    #[test]
    #[serial]
    fn test_unwritable_log_file_is_reported() {
        LoggingSystem::reset_for_testing();

        let mut config = create_test_config();
        config.file_path = Some(PathBuf::from("/nonexistent-dir/blockstack-cli.log"));

        assert!(LoggingSystem::setup_logging(config.clone()).is_err());
        // 失败结果被记住，不会重复尝试
        assert!(LoggingSystem::setup_logging(config).is_err());
    }

    #[test]
    #[serial]
    fn test_from_config_reads_log_keys() {
        std::env::remove_var(DEBUG_ENV_VAR);

        let config = CliConfig {
            log_level: "info".to_string(),
            log_format: "json".to_string(),
            log_file: Some(PathBuf::from("/tmp/blockstack-cli.log")),
            ..Default::default()
        };
        let log_config = LogConfig::from_config(&config);
        assert_eq!(log_config.level, LevelFilter::Info);
        assert!(log_config.json_format);
        assert_eq!(log_config.file_path, Some(PathBuf::from("/tmp/blockstack-cli.log")));

        let defaults = LogConfig::from_config(&CliConfig::default());
        assert_eq!(defaults, LogConfig::default());
    }

    #[test]
    #[serial]
    fn test_level_from_config() {
        std::env::remove_var(DEBUG_ENV_VAR);
        let with_level = |level: &str| CliConfig {
            log_level: level.to_string(),
            ..Default::default()
        };

        assert_eq!(LogConfig::from_config(&with_level("ERROR")).level, LevelFilter::Error);
        assert_eq!(LogConfig::from_config(&with_level("bogus")).level, LevelFilter::Warn);

        std::env::set_var(DEBUG_ENV_VAR, "1");
        assert_eq!(LogConfig::from_config(&with_level("warn")).level, LevelFilter::Debug);
        std::env::remove_var(DEBUG_ENV_VAR);
    }
}
