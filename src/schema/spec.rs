//! 命令表数据结构定义
//!
//! 定义命令与参数的描述结构，以及命令表的自洽性校验

use crate::error::SchemaError;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};

/// 单个参数槽位的描述
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    /// `--name value` 形式调用时使用的关键字
    pub name: &'static str,
    /// 语义类型，仅用于显示
    pub kind: &'static str,
    /// 原始正则片段
    pattern_source: Option<&'static str>,
    /// 编译后的整串匹配正则
    pattern: Option<Regex>,
}

impl ArgumentSpec {
    /// 创建参数描述并编译格式正则
    ///
    /// # 参数
    /// * `name` - 参数关键字
    /// * `kind` - 语义类型
    /// * `pattern` - 不带锚点的正则片段，`None` 表示接受任意非空字符串
    pub fn new(
        name: &'static str,
        kind: &'static str,
        pattern: Option<&'static str>,
    ) -> std::result::Result<Self, regex::Error> {
        let compiled = pattern
            .map(|source| Regex::new(&format!("^(?:{source})$")))
            .transpose()?;

        Ok(Self {
            name,
            kind,
            pattern_source: pattern,
            pattern: compiled,
        })
    }

    /// 原始正则片段
    pub fn pattern(&self) -> Option<&'static str> {
        self.pattern_source
    }

    /// 检查取值是否符合该参数的格式
    pub fn accepts(&self, value: &str) -> bool {
        match &self.pattern {
            Some(regex) => regex.is_match(value),
            None => !value.is_empty(),
        }
    }

    /// 位置形式显示名，如 `ADDRESS`
    pub fn display_name(&self) -> String {
        self.name.to_uppercase()
    }
}

/// 单个命令的描述
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// 命令名称
    pub name: &'static str,
    /// 按位置顺序排列的参数
    pub arguments: Vec<ArgumentSpec>,
    /// 最少参数个数
    pub min_args: usize,
    /// 最多参数个数，恒等于参数列表长度
    pub max_args: usize,
    /// 帮助文本，空行表示段落分隔
    pub help: &'static str,
    /// 显示分组
    pub group: &'static str,
}

impl CommandSpec {
    /// 创建命令描述，最多参数个数取参数列表长度
    pub fn new(
        name: &'static str,
        group: &'static str,
        min_args: usize,
        arguments: Vec<ArgumentSpec>,
        help: &'static str,
    ) -> Self {
        let max_args = arguments.len();
        Self {
            name,
            arguments,
            min_args,
            max_args,
            help,
            group,
        }
    }

    /// 按名称查找参数
    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    /// 第 `index` 个参数（从0开始）是否为可选参数
    pub fn is_optional(&self, index: usize) -> bool {
        index + 1 > self.min_args
    }

    /// 校验单个命令描述的自洽性
    fn check(&self) -> std::result::Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyCommandName);
        }

        if self.min_args > self.max_args || self.max_args != self.arguments.len() {
            return Err(SchemaError::InvalidArity {
                command: self.name.to_string(),
                min: self.min_args,
                max: self.max_args,
            });
        }

        let mut seen = HashSet::new();
        for (index, arg) in self.arguments.iter().enumerate() {
            if arg.name.trim().is_empty() {
                return Err(SchemaError::EmptyArgumentName {
                    command: self.name.to_string(),
                    index,
                });
            }
            if arg.kind.trim().is_empty() {
                return Err(SchemaError::EmptyArgumentType {
                    command: self.name.to_string(),
                    argument: arg.name.to_string(),
                });
            }
            if !seen.insert(arg.name) {
                return Err(SchemaError::DuplicateArgument {
                    command: self.name.to_string(),
                    argument: arg.name.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// 命令表
///
/// 进程启动时构建一次，之后只读。
#[derive(Debug, Clone)]
pub struct CommandSchema {
    commands: Vec<CommandSpec>,
    index: HashMap<&'static str, usize>,
}

impl CommandSchema {
    /// 构建命令表并校验自洽性
    ///
    /// # 参数
    /// * `commands` - 命令描述列表
    ///
    /// # 返回
    /// * `Result<Self, SchemaError>` - 命令表或第一个编写错误
    pub fn new(commands: Vec<CommandSpec>) -> std::result::Result<Self, SchemaError> {
        let mut index = HashMap::with_capacity(commands.len());

        for (position, command) in commands.iter().enumerate() {
            command.check()?;
            if index.insert(command.name, position).is_some() {
                return Err(SchemaError::DuplicateCommand(command.name.to_string()));
            }
        }

        Ok(Self { commands, index })
    }

    /// 按名称查找命令，未找到返回 `None`
    pub fn lookup(&self, name: &str) -> Option<&CommandSpec> {
        self.index.get(name).map(|&position| &self.commands[position])
    }

    /// 按声明顺序返回全部命令
    pub fn all_commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// 按分组返回命令，分组名升序，组内命令名升序
    pub fn grouped_commands(&self) -> BTreeMap<&'static str, Vec<&CommandSpec>> {
        let mut groups: BTreeMap<&'static str, Vec<&CommandSpec>> = BTreeMap::new();
        for command in &self.commands {
            groups.entry(command.group).or_default().push(command);
        }
        for members in groups.values_mut() {
            members.sort_by_key(|command| command.name);
        }
        groups
    }

    /// 命令数量
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// 命令表是否为空
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(name: &'static str, kind: &'static str, pattern: Option<&'static str>) -> ArgumentSpec {
        ArgumentSpec::new(name, kind, pattern).unwrap()
    }

    fn sample_command(name: &'static str, group: &'static str) -> CommandSpec {
        CommandSpec::new(
            name,
            group,
            1,
            vec![
                arg("address", "address", Some(r"[a-z]+")),
                arg("page", "integer", Some(r"[0-9]+")),
            ],
            "Sample command.",
        )
    }

    #[test]
    fn test_pattern_requires_full_match() {
        let spec = arg("page", "integer", Some(r"[0-9]+"));
        assert!(spec.accepts("42"));
        assert!(!spec.accepts("42a"));
        assert!(!spec.accepts("a42"));
        assert!(!spec.accepts(""));
    }

    #[test]
    fn test_missing_pattern_accepts_any_non_empty() {
        let spec = arg("path", "path", None);
        assert!(spec.accepts("anything at all"));
        assert!(!spec.accepts(""));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        let spec = arg("flag", "boolean", Some(r"true|false"));
        assert!(spec.accepts("true"));
        assert!(!spec.accepts("truex"));
        assert!(!spec.accepts("xfalse"));
    }

    #[test]
    fn test_max_args_follows_argument_count() {
        let command = sample_command("balance", "Accounts");
        assert_eq!(command.min_args, 1);
        assert_eq!(command.max_args, 2);
        assert!(!command.is_optional(0));
        assert!(command.is_optional(1));
    }

    #[test]
    fn test_lookup_and_not_found() {
        let schema = CommandSchema::new(vec![sample_command("balance", "Accounts")]).unwrap();
        assert!(schema.lookup("balance").is_some());
        assert!(schema.lookup("missing").is_none());
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn test_grouped_commands_sorted() {
        let schema = CommandSchema::new(vec![
            sample_command("zeta", "Utilities"),
            sample_command("alpha", "Utilities"),
            sample_command("balance", "Accounts"),
        ])
        .unwrap();

        let groups = schema.grouped_commands();
        let labels: Vec<_> = groups.keys().copied().collect();
        assert_eq!(labels, vec!["Accounts", "Utilities"]);

        let names: Vec<_> = groups["Utilities"].iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_duplicate_command_rejected() {
        let result = CommandSchema::new(vec![
            sample_command("balance", "Accounts"),
            sample_command("balance", "Accounts"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            SchemaError::DuplicateCommand("balance".to_string())
        );
    }

    #[test]
    fn test_duplicate_argument_rejected() {
        let command = CommandSpec::new(
            "broken",
            "Utilities",
            1,
            vec![arg("value", "string", None), arg("value", "string", None)],
            "",
        );
        assert!(matches!(
            CommandSchema::new(vec![command]),
            Err(SchemaError::DuplicateArgument { .. })
        ));
    }

    #[test]
    fn test_invalid_arity_rejected() {
        let command = CommandSpec::new(
            "broken",
            "Utilities",
            2,
            vec![arg("value", "string", None)],
            "",
        );
        assert!(matches!(
            CommandSchema::new(vec![command]),
            Err(SchemaError::InvalidArity { min: 2, max: 1, .. })
        ));
    }

    #[test]
    fn test_empty_argument_name_rejected() {
        let command = CommandSpec::new(
            "broken",
            "Utilities",
            0,
            vec![arg("", "string", None)],
            "",
        );
        assert!(matches!(
            CommandSchema::new(vec![command]),
            Err(SchemaError::EmptyArgumentName { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_argument_type_rejected() {
        let command = CommandSpec::new("broken", "Utilities", 0, vec![arg("value", "", None)], "");
        assert!(matches!(
            CommandSchema::new(vec![command]),
            Err(SchemaError::EmptyArgumentType { .. })
        ));
    }
}
