//! 全局短选项扫描器
//!
//! 简化的 getopt 风格扫描：逐个选项字母扫描整个参数列表，
//! 命中的记号被清空，剩余记号作为命令及其参数。
//! 与标准 getopt(3) 不同，`--` 不会终止扫描，只会被丢弃。

use std::collections::BTreeMap;

/// 客户端识别的全局选项规格
pub const GLOBAL_OPTION_SPEC: &str = "eitUxc:B:D:C:F:G:H:N:P:T:";

/// 全局选项说明，用于参考文档
pub const GLOBAL_OPTION_HELP: &[(&str, &str)] = &[
    ("-c FILE", "Path to the configuration file"),
    ("-e", "Estimate the fee for a transaction and exit"),
    ("-i", "Use the integration test framework (regtest)"),
    ("-t", "Use the public testnet"),
    ("-U", "Unsafe mode: disable safety checks"),
    ("-x", "Do not broadcast a transaction; print it instead"),
    ("-B BURN_ADDR", "Use this burn address for namespace fees"),
    ("-C CONSENSUS_HASH", "Use this consensus hash instead of querying one"),
    ("-D DENOMINATION", "Denomination of the price given with -P"),
    ("-F FEE_RATE", "Use this fee rate (satoshis per byte)"),
    ("-G GRACE_PERIOD", "Use this grace period for name expiration"),
    ("-H URL", "Use an alternative node API URL"),
    ("-N PAY2NS_PERIOD", "Pay-to-namespace period for namespace fees"),
    ("-P PRICE", "Use this name price instead of querying one"),
    ("-T URL", "Use an alternative transaction broadcaster"),
];

/// 单个选项的取值
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// 布尔开关
    Switch(bool),
    /// 带值选项，`None` 表示未设置或缺少取值
    Value(Option<String>),
}

/// 选项扫描结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionTable {
    values: BTreeMap<char, OptionValue>,
    /// 未被选项消耗的记号，对应 `_`
    pub remaining: Vec<String>,
}

impl OptionTable {
    /// 布尔开关是否打开，未知选项视为关闭
    pub fn flag(&self, option: char) -> bool {
        matches!(self.values.get(&option), Some(OptionValue::Switch(true)))
    }

    /// 带值选项的取值
    pub fn value(&self, option: char) -> Option<&str> {
        match self.values.get(&option) {
            Some(OptionValue::Value(Some(value))) => Some(value.as_str()),
            _ => None,
        }
    }

    /// 原始选项表
    pub fn get(&self, option: char) -> Option<&OptionValue> {
        self.values.get(&option)
    }

    /// 选项表中的全部选项字母
    pub fn options(&self) -> impl Iterator<Item = char> + '_ {
        self.values.keys().copied()
    }
}

/// 解析选项规格字符串
///
/// 字母后紧跟 `:` 表示该选项需要取值。
fn parse_spec(spec: &str) -> Vec<(char, bool)> {
    let chars: Vec<char> = spec.chars().collect();
    let mut options = Vec::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == ':' {
            continue;
        }
        let takes_value = chars.get(i + 1) == Some(&':');
        options.push((c, takes_value));
    }
    options
}

/// 扫描参数列表中的全局选项
///
/// # 参数
/// * `argv` - 去掉程序名后的参数列表
/// * `spec` - 选项规格，如 `"eitUxC:"`
///
/// # 返回
/// * `OptionTable` - 选项表与剩余记号
///
/// 带值选项位于最后一个记号时取值为未设置，不报错。
pub fn parse_options<S: AsRef<str>>(argv: &[S], spec: &str) -> OptionTable {
    let mut buffer: Vec<Option<String>> =
        argv.iter().map(|s| Some(s.as_ref().to_string())).collect();
    let mut values = BTreeMap::new();

    for (option, takes_value) in parse_spec(spec) {
        let flag = format!("-{option}");

        if takes_value {
            let mut value = None;
            let position = buffer
                .iter()
                .position(|token| token.as_deref() == Some(flag.as_str()));
            if let Some(i) = position {
                buffer[i] = None;
                if let Some(slot) = buffer.get_mut(i + 1) {
                    value = slot.take();
                }
            }
            values.insert(option, OptionValue::Value(value));
        } else {
            let mut seen = false;
            for token in buffer.iter_mut() {
                if token.as_deref() == Some(flag.as_str()) {
                    seen = true;
                    *token = None;
                }
            }
            values.insert(option, OptionValue::Switch(seen));
        }
    }

    let remaining = buffer
        .into_iter()
        .flatten()
        .filter(|token| token != "--")
        .collect();

    OptionTable { values, remaining }
}
