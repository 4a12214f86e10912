//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// Blockstack CLI 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum BlockstackCliError {
    /// 命令行参数解析错误
    #[error("{0}")]
    ArgParse(#[from] ArgParseError),

    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 网络相关错误
    #[error("网络错误: {0}")]
    Network(#[from] NetworkError),

    /// 命令分发错误
    #[error("{0}")]
    Dispatch(#[from] DispatchError),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 命令参数解析错误类型
///
/// 全部属于用户输入错误，以结构化结果返回，不会导致进程崩溃。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgParseError {
    /// 未提供命令
    #[error("No command given")]
    NoCommandGiven,

    /// 未识别的命令
    #[error("Unrecognized command '{0}'")]
    UnrecognizedCommand(String),

    /// 同一关键字参数出现两次
    #[error("Duplicate argument '--{0}'")]
    DuplicateArgument(String),

    /// 关键字参数不属于该命令
    #[error("Unknown argument '--{0}'")]
    UnknownArgument(String),

    /// 关键字参数缺少取值
    #[error("Missing value for argument '--{0}'")]
    MissingValue(String),

    /// 参数个数或格式校验失败
    ///
    /// `detail` 仅用于调试日志，显示信息保持通用。
    #[error("Invalid command arguments")]
    InvalidArguments {
        command: String,
        detail: Option<String>,
    },
}

impl ArgParseError {
    /// 构造带字段细节的参数校验错误
    pub fn invalid_with(command: &str, detail: impl Into<String>) -> Self {
        Self::InvalidArguments {
            command: command.to_string(),
            detail: Some(detail.into()),
        }
    }
}

/// 命令表编写错误类型
///
/// 表示命令表本身的缺陷，而不是用户输入错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// 命令名称为空
    #[error("命令名称不能为空")]
    EmptyCommandName,

    /// 命令重复定义
    #[error("命令重复定义: {0}")]
    DuplicateCommand(String),

    /// 参数名称为空
    #[error("命令 {command} 的第 {index} 个参数缺少名称")]
    EmptyArgumentName { command: String, index: usize },

    /// 参数类型为空
    #[error("命令 {command} 的参数 {argument} 缺少类型")]
    EmptyArgumentType { command: String, argument: String },

    /// 参数名称重复
    #[error("命令 {command} 的参数 {argument} 重复定义")]
    DuplicateArgument { command: String, argument: String },

    /// 参数个数范围无效
    #[error("命令 {command} 的参数个数范围无效: min={min}, max={max}")]
    InvalidArity {
        command: String,
        min: usize,
        max: usize,
    },

    /// 参数格式正则无效
    #[error("命令 {command} 的参数 {argument} 的正则表达式无效: {message}")]
    InvalidPattern {
        command: String,
        argument: String,
        message: String,
    },
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件解析错误
    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    /// 环境变量替换错误
    #[error("环境变量替换失败: {var}")]
    EnvVarError { var: String },
}

/// 网络错误类型
#[derive(Error, Debug)]
pub enum NetworkError {
    /// HTTP请求错误
    #[error("HTTP请求失败: {0}")]
    Request(#[from] reqwest::Error),

    /// 节点返回非成功状态码
    #[error("节点返回错误状态: {url} -> {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// 响应解析错误
    #[error("响应解析失败: {0}")]
    Decode(String),
}

/// 命令分发错误类型
///
/// 参数已通过校验，但在执行前无法继续。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// 命令没有注册处理器
    #[error("命令 '{0}' 需要外部SDK支持，当前客户端未提供处理器")]
    HandlerMissing(String),

    /// 全局选项取值无效
    #[error("全局选项 -{option} 的取值无效: {value}")]
    InvalidOverride { option: char, value: String },

    /// 分页或区块高度参数不是数值
    #[error("无效的数值参数: {0}")]
    InvalidNumber(String),
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, BlockstackCliError>;
