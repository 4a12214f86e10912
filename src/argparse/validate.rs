//! 参数校验
//!
//! 按命令表检查归并后的参数个数和每个参数的格式

use crate::error::ArgParseError;
use crate::schema::{CommandSchema, CommandSpec};

/// 校验单个命令的参数向量
///
/// 依次检查参数个数与格式，第一个失败项即返回。错误信息保持通用，
/// 具体字段记录在 `detail` 中。
pub fn validate_command<S: AsRef<str>>(
    command: &CommandSpec,
    args: &[S],
) -> Result<(), ArgParseError> {
    if args.len() < command.min_args || args.len() > command.max_args {
        return Err(ArgParseError::invalid_with(
            command.name,
            format!(
                "expected {}..={} arguments, got {}",
                command.min_args,
                command.max_args,
                args.len()
            ),
        ));
    }

    for (spec, value) in command.arguments.iter().zip(args) {
        if !spec.accepts(value.as_ref()) {
            return Err(ArgParseError::invalid_with(
                command.name,
                format!("argument '{}' does not match {}", spec.name, spec.kind),
            ));
        }
    }

    Ok(())
}

/// 严格模式校验：命令必须存在于命令表中
///
/// # 参数
/// * `schema` - 命令表
/// * `command` - 命令名称
/// * `args` - 归并后的参数向量
pub fn validate<S: AsRef<str>>(
    schema: &CommandSchema,
    command: &str,
    args: &[S],
) -> Result<(), ArgParseError> {
    match schema.lookup(command) {
        Some(spec) => validate_command(spec, args),
        None => Err(ArgParseError::invalid_with(command, "command is not in the schema")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ArgumentSpec;

    fn schema() -> CommandSchema {
        CommandSchema::new(vec![CommandSpec::new(
            "history",
            "Test",
            1,
            vec![
                ArgumentSpec::new("address", "address", Some("[a-z]{3}")).unwrap(),
                ArgumentSpec::new("page", "integer", Some("[0-9]+")).unwrap(),
            ],
            "",
        )])
        .unwrap()
    }

    #[test]
    fn test_valid_arguments() {
        assert!(validate(&schema(), "history", &["abc"]).is_ok());
        assert!(validate(&schema(), "history", &["abc", "3"]).is_ok());
    }

    #[test]
    fn test_too_few_arguments() {
        let err = validate::<&str>(&schema(), "history", &[]).unwrap_err();
        assert!(matches!(err, ArgParseError::InvalidArguments { .. }));
    }

    #[test]
    fn test_too_many_arguments() {
        let err = validate(&schema(), "history", &["abc", "1", "2"]).unwrap_err();
        assert!(matches!(err, ArgParseError::InvalidArguments { .. }));
    }

    #[test]
    fn test_pattern_mismatch() {
        let err = validate(&schema(), "history", &["abc", "x"]).unwrap_err();
        match err {
            ArgParseError::InvalidArguments { command, detail } => {
                assert_eq!(command, "history");
                assert!(detail.unwrap().contains("page"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_command_is_invalid() {
        let err = validate(&schema(), "nope", &["abc"]).unwrap_err();
        assert!(matches!(err, ArgParseError::InvalidArguments { .. }));
    }

    #[test]
    fn test_message_is_generic() {
        let err = validate(&schema(), "history", &["abc", "x"]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid command arguments");
    }
}
