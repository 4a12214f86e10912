//! 用法文本生成
//!
//! 由命令表渲染命令列表、单个命令用法和完整参考文档，均为纯函数

use super::options::GLOBAL_OPTION_HELP;
use crate::schema::{CommandSchema, CommandSpec};

/// 文本折行宽度
pub const WRAP_COLUMNS: usize = 70;

/// 按单词贪心折行
///
/// # 参数
/// * `indent` - 每行缩进宽度
/// * `limit` - 每行最大宽度（含缩进）
/// * `text` - 原始文本，空行表示段落分隔
///
/// 超过宽度的单个单词独占一行，不会被截断。
pub fn word_wrap(indent: usize, limit: usize, text: &str) -> String {
    let pad = " ".repeat(indent);
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();

    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if lines.last().is_some_and(|last| !last.is_empty()) {
                lines.push(String::new());
            }
            continue;
        }

        for word in raw_line.split_whitespace() {
            if line.is_empty() {
                line = format!("{pad}{word}");
            } else if line.chars().count() + 1 + word.chars().count() > limit {
                lines.push(std::mem::replace(&mut line, format!("{pad}{word}")));
            } else {
                line.push(' ');
                line.push_str(word);
            }
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    while lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// 按分组列出全部命令
pub fn all_commands_list(schema: &CommandSchema) -> String {
    let mut out = format!(
        "All commands (run '{} help COMMAND' for details):\n",
        crate::APP_NAME
    );

    for (group, members) in schema.grouped_commands() {
        let names: Vec<&str> = members.iter().map(|command| command.name).collect();
        let wrapped = word_wrap(4, WRAP_COLUMNS, &names.join(" "));
        let listed: Vec<String> = wrapped
            .lines()
            .map(|line| format!("    {}", line.split_whitespace().collect::<Vec<_>>().join(", ")))
            .collect();

        out.push_str(&format!("\n  {group}:\n{}\n", listed.join(",\n")));
    }

    out
}

/// 位置形式用法行，如 `balance ADDRESS [PAGE]`
fn positional_line(command: &CommandSpec) -> String {
    let mut line = format!("  {}", command.name);
    for (index, arg) in command.arguments.iter().enumerate() {
        if command.is_optional(index) {
            line.push_str(&format!(" [{}]", arg.display_name()));
        } else {
            line.push_str(&format!(" {}", arg.display_name()));
        }
    }
    line
}

/// 关键字形式用法，每个参数一行并对齐
fn keyword_lines(command: &CommandSpec) -> String {
    let continuation = " ".repeat(command.name.len() + 3);
    command
        .arguments
        .iter()
        .enumerate()
        .map(|(index, arg)| {
            let keyword = format!("--{} {}", arg.name, arg.kind.to_uppercase());
            let keyword = if command.is_optional(index) {
                format!("[{keyword}]")
            } else {
                keyword
            };
            if index == 0 {
                format!("  {} {keyword}", command.name)
            } else {
                format!("{continuation}{keyword}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 单个命令的用法块：位置形式、关键字形式和帮助文本
fn usage_block(command: &CommandSpec) -> String {
    let mut block = positional_line(command);
    if !command.arguments.is_empty() {
        block.push_str("\n\n");
        block.push_str(&keyword_lines(command));
    }
    block.push_str("\n\n");
    block.push_str(&word_wrap(2, WRAP_COLUMNS, command.help));
    block.push('\n');
    block
}

/// 单个命令的用法
///
/// 命令未知或为 `help` 时返回完整命令列表。
pub fn command_usage(schema: &CommandSchema, name: &str) -> String {
    match schema.lookup(name) {
        Some(command) if name != "help" => {
            format!("Usage:\n{}", usage_block(command))
        }
        _ => all_commands_list(schema),
    }
}

/// 完整参考文档：全局选项加上按分组排列的全部命令
pub fn full_reference(schema: &CommandSchema) -> String {
    let mut out = format!(
        "Usage: {} [options] COMMAND [ARGUMENTS...]\n\nGlobal options:\n",
        crate::APP_NAME
    );
    for (option, description) in GLOBAL_OPTION_HELP {
        out.push_str(&format!("  {option:<20} {description}\n"));
    }

    for (group, members) in schema.grouped_commands() {
        out.push_str(&format!("\n{group}\n{}\n", "=".repeat(group.len())));
        for command in members {
            out.push('\n');
            out.push_str(&usage_block(command));
        }
    }

    out
}
