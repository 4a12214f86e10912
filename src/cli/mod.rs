//! 命令行接口模块
//!
//! 提供执行选项、命令分发和调用流程

pub mod app;
pub mod commands;
pub mod options;

// 重新导出主要类型
pub use app::run;
pub use commands::{CommandContext, CommandHandler, CommandRegistry, Query, QueryCommand};
pub use options::ExecutionOptions;
