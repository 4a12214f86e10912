//! 命令表模块
//!
//! 提供命令与参数的声明式描述、格式正则和内置命令表

pub mod patterns;
pub mod spec;
pub mod table;

// 重新导出主要类型
pub use spec::{ArgumentSpec, CommandSchema, CommandSpec};
pub use table::builtin;
