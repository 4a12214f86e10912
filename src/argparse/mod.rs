//! 命令行参数解析模块
//!
//! 提供全局选项扫描、参数归并、参数校验和用法文本生成功能

pub mod options;
pub mod reconcile;
pub mod usage;
pub mod validate;

// 重新导出主要类型
pub use options::{parse_options, OptionTable, OptionValue, GLOBAL_OPTION_SPEC};
pub use reconcile::reconcile;
pub use usage::{all_commands_list, command_usage, full_reference, word_wrap};
pub use validate::{validate, validate_command};

use crate::error::ArgParseError;
use crate::schema::CommandSchema;

/// 一次解析的最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// 解析成功
    Success {
        /// 命令名称
        command: String,
        /// 按声明顺序排列的参数值
        args: Vec<String>,
    },
    /// 解析失败
    Failure {
        /// 失败原因
        error: ArgParseError,
        /// 已识别的命令名称
        command: Option<String>,
        /// 是否需要打印用法
        show_usage: bool,
    },
}

impl ParseOutcome {
    /// 是否解析成功
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    fn failure(error: ArgParseError, command: Option<&str>) -> Self {
        Self::Failure {
            error,
            command: command.map(str::to_string),
            show_usage: true,
        }
    }

    /// 失败时应打印的用法文本
    ///
    /// 命令已识别时返回该命令用法，否则返回完整命令列表。
    pub fn usage(&self, schema: &CommandSchema) -> Option<String> {
        match self {
            Self::Failure {
                show_usage: true,
                command,
                ..
            } => Some(match command {
                Some(name) => command_usage(schema, name),
                None => all_commands_list(schema),
            }),
            _ => None,
        }
    }
}

/// 解析命令及其参数
///
/// # 参数
/// * `schema` - 命令表
/// * `tokens` - 全局选项之外的记号，第一个为命令名称
///
/// # 返回
/// * `ParseOutcome` - 成功时携带校验通过的参数向量
pub fn parse_command_args<S: AsRef<str>>(schema: &CommandSchema, tokens: &[S]) -> ParseOutcome {
    let Some((first, rest)) = tokens.split_first() else {
        return ParseOutcome::failure(ArgParseError::NoCommandGiven, None);
    };
    let name = first.as_ref();

    let Some(command) = schema.lookup(name) else {
        return ParseOutcome::failure(ArgParseError::UnrecognizedCommand(name.to_string()), None);
    };

    let args = match reconcile(command, rest) {
        Ok(args) => args,
        Err(error) => return ParseOutcome::failure(error, Some(name)),
    };
    tracing::trace!("命令 {} 归并后的参数: {:?}", name, args);

    if let Err(error) = validate(schema, name, args.as_slice()) {
        if let ArgParseError::InvalidArguments {
            detail: Some(ref detail),
            ..
        } = error
        {
            tracing::debug!("命令 {} 参数校验失败: {}", name, detail);
        }
        return ParseOutcome::failure(error, Some(name));
    }

    ParseOutcome::Success {
        command: name.to_string(),
        args,
    }
}
