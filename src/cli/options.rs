//! 执行选项
//!
//! 由全局选项表构建的只读执行选项，随命令分发显式传递

use crate::argparse::OptionTable;
use crate::error::DispatchError;
use std::path::PathBuf;

/// 单次调用的执行选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// 只估算费用，不发送交易（-e）
    pub estimate_only: bool,
    /// 使用测试网（-t）
    pub testnet: bool,
    /// 使用集成测试环境（-i）
    pub integration_test: bool,
    /// 是否执行安全检查（-U 关闭）
    pub safety_checks: bool,
    /// 只生成交易，不广播（-x）
    pub tx_only: bool,
    /// 配置文件路径（-c）
    pub config_path: Option<PathBuf>,
    /// 燃烧地址（-B）
    pub burn_address: Option<String>,
    /// 价格单位（-D）
    pub denomination: Option<String>,
    /// 共识哈希（-C）
    pub consensus_hash: Option<String>,
    /// 费率，satoshi/字节（-F）
    pub fee_rate: Option<u64>,
    /// 名称过期宽限期（-G）
    pub grace_period: Option<u64>,
    /// 节点 API 地址（-H）
    pub api_url: Option<String>,
    /// 向命名空间付费的周期（-N）
    pub receive_fees_period: Option<u64>,
    /// 名称价格（-P）
    pub price: Option<u64>,
    /// 交易广播服务地址（-T）
    pub broadcaster_url: Option<String>,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            estimate_only: false,
            testnet: false,
            integration_test: false,
            safety_checks: true,
            tx_only: false,
            config_path: None,
            burn_address: None,
            denomination: None,
            consensus_hash: None,
            fee_rate: None,
            grace_period: None,
            api_url: None,
            receive_fees_period: None,
            price: None,
            broadcaster_url: None,
        }
    }
}

/// 解析数值型选项
fn numeric(table: &OptionTable, option: char) -> Result<Option<u64>, DispatchError> {
    table
        .value(option)
        .map(|raw| {
            raw.parse::<u64>().map_err(|_| DispatchError::InvalidOverride {
                option,
                value: raw.to_string(),
            })
        })
        .transpose()
}

fn text(table: &OptionTable, option: char) -> Option<String> {
    table.value(option).map(str::to_string)
}

impl ExecutionOptions {
    /// 由全局选项表构建执行选项
    ///
    /// # 参数
    /// * `table` - [`parse_options`](crate::argparse::parse_options) 的结果
    ///
    /// # 返回
    /// * `Result<Self, DispatchError>` - 数值型选项无法解析时返回错误
    pub fn from_table(table: &OptionTable) -> Result<Self, DispatchError> {
        Ok(Self {
            estimate_only: table.flag('e'),
            testnet: table.flag('t'),
            integration_test: table.flag('i'),
            safety_checks: !table.flag('U'),
            tx_only: table.flag('x'),
            config_path: table.value('c').map(PathBuf::from),
            burn_address: text(table, 'B'),
            denomination: text(table, 'D'),
            consensus_hash: text(table, 'C'),
            fee_rate: numeric(table, 'F')?,
            grace_period: numeric(table, 'G')?,
            api_url: text(table, 'H'),
            receive_fees_period: numeric(table, 'N')?,
            price: numeric(table, 'P')?,
            broadcaster_url: text(table, 'T'),
        })
    }

    /// 是否需要实际广播交易
    pub fn should_broadcast(&self) -> bool {
        !self.estimate_only && !self.tx_only
    }
}
