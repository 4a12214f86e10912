//! Blockstack CLI - Blockstack 命名网络命令行客户端
//!
//! 这是一个用Rust编写的命令行客户端，支持：
//! - 声明式命令表与参数格式校验
//! - getopt 风格的全局选项扫描
//! - 位置参数与 `--name value` 关键字参数混用
//! - 命令用法与完整参考文档生成
//! - 节点查询与交易广播
//! - 结构化日志记录

pub mod argparse;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod schema;

// 重新导出主要类型
pub use argparse::{parse_command_args, parse_options, ParseOutcome};
pub use config::CliConfig;
pub use error::{ArgParseError, BlockstackCliError};
pub use schema::{CommandSchema, CommandSpec};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
