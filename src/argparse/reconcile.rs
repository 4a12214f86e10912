//! 参数归并
//!
//! 将 `--name value` 关键字参数与位置参数合并为命令声明顺序的参数向量

use crate::error::ArgParseError;
use crate::schema::CommandSpec;
use std::collections::{HashMap, VecDeque};

/// 归并命令参数
///
/// # 参数
/// * `command` - 命令描述
/// * `tokens` - 命令名之后的全部记号
///
/// # 返回
/// * `Result<Vec<String>, ArgParseError>` - 按声明顺序排列的参数值
///
/// 关键字绑定的参数占据自己的位置而不消耗位置参数，其余槽位按声明顺序
/// 依次取位置参数；位置参数耗尽时停止，其后的槽位（包括已绑定的）不再输出。
/// 未被任何槽位取走的多余位置参数被丢弃，结果长度不超过 `max_args`。
pub fn reconcile<S: AsRef<str>>(
    command: &CommandSpec,
    tokens: &[S],
) -> Result<Vec<String>, ArgParseError> {
    let mut keywords: HashMap<&str, String> = HashMap::new();
    let mut positionals: VecDeque<String> = VecDeque::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_ref();
        if let Some(name) = token.strip_prefix("--") {
            if keywords.contains_key(name) {
                return Err(ArgParseError::DuplicateArgument(name.to_string()));
            }
            let Some(spec) = command.argument(name) else {
                return Err(ArgParseError::UnknownArgument(name.to_string()));
            };
            let Some(value) = tokens.get(i + 1) else {
                return Err(ArgParseError::MissingValue(name.to_string()));
            };
            keywords.insert(spec.name, value.as_ref().to_string());
            i += 2;
        } else {
            positionals.push_back(token.to_string());
            i += 1;
        }
    }

    let mut ordered = Vec::with_capacity(command.max_args);
    for spec in &command.arguments {
        if let Some(value) = keywords.remove(spec.name) {
            ordered.push(value);
        } else if let Some(value) = positionals.pop_front() {
            ordered.push(value);
        } else {
            break;
        }
    }

    if !positionals.is_empty() {
        tracing::debug!(
            "命令 {} 收到多余的位置参数: {:?}",
            command.name,
            positionals
        );
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ArgumentSpec;

    fn command() -> CommandSpec {
        CommandSpec::new(
            "transfer",
            "Test",
            2,
            vec![
                ArgumentSpec::new("name", "name", None).unwrap(),
                ArgumentSpec::new("address", "address", None).unwrap(),
                ArgumentSpec::new("keep", "boolean", None).unwrap(),
            ],
            "",
        )
    }

    #[test]
    fn test_positional_passthrough() {
        let result = reconcile(&command(), &["a", "b", "c"]).unwrap();
        assert_eq!(result, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_keyword_any_order() {
        let result = reconcile(
            &command(),
            &["--keep", "c", "--name", "a", "--address", "b"],
        )
        .unwrap();
        assert_eq!(result, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_keyword_reserves_its_slot() {
        let result = reconcile(&command(), &["--address", "b", "a", "c"]).unwrap();
        assert_eq!(result, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_exhausted_positionals_stop_reassembly() {
        // keep 已绑定，但 address 缺少位置参数，组装在 address 处停止
        let result = reconcile(&command(), &["--keep", "c", "a"]).unwrap();
        assert_eq!(result, vec!["a"]);
    }

    #[test]
    fn test_omitted_trailing_optional() {
        let result = reconcile(&command(), &["a", "b"]).unwrap();
        assert_eq!(result, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_keyword() {
        let err = reconcile(&command(), &["--name", "a", "--name", "a"]).unwrap_err();
        assert_eq!(err, ArgParseError::DuplicateArgument("name".to_string()));
    }

    #[test]
    fn test_unknown_keyword() {
        let err = reconcile(&command(), &["--owner", "a"]).unwrap_err();
        assert_eq!(err, ArgParseError::UnknownArgument("owner".to_string()));
    }

    #[test]
    fn test_missing_value() {
        let err = reconcile(&command(), &["a", "--address"]).unwrap_err();
        assert_eq!(err, ArgParseError::MissingValue("address".to_string()));
    }

    #[test]
    fn test_duplicate_reported_before_unknown() {
        let err = reconcile(&command(), &["--bogus", "1"]).unwrap_err();
        assert_eq!(err, ArgParseError::UnknownArgument("bogus".to_string()));

        let err = reconcile(&command(), &["--name", "a", "--name"]).unwrap_err();
        assert_eq!(err, ArgParseError::DuplicateArgument("name".to_string()));
    }

    #[test]
    fn test_surplus_positionals_are_dropped() {
        let spec = command();
        let result = reconcile(&spec, &["a", "b", "c", "d"]).unwrap();
        assert_eq!(result, vec!["a", "b", "c"]);
        assert!(result.len() <= spec.max_args);
    }

    #[test]
    fn test_keyword_value_may_look_like_flag() {
        let result = reconcile(&command(), &["--name", "--odd", "b"]).unwrap();
        assert_eq!(result, vec!["--odd", "b"]);
    }
}
