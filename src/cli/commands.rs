//! 命令处理逻辑
//!
//! 将解析成功的命令分发到对应的处理器

use crate::argparse::{command_usage, full_reference};
use crate::cli::options::ExecutionOptions;
use crate::error::{DispatchError, Result};
use crate::network::{NetworkClient, NetworkSettings};
use crate::schema::CommandSchema;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// 命令执行上下文
///
/// 由调用方构建后显式传递给处理器，处理器之间不共享可变状态。
#[derive(Clone)]
pub struct CommandContext {
    /// 执行选项
    pub options: ExecutionOptions,
    /// 网络设置
    pub network: NetworkSettings,
    /// 节点客户端
    pub client: Arc<dyn NetworkClient>,
}

/// 命令处理器trait
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// 执行命令
    ///
    /// # 参数
    /// * `ctx` - 执行上下文
    /// * `args` - 校验通过的参数，按声明顺序排列
    ///
    /// # 返回
    /// * `Result<String>` - 输出到标准输出的文本
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<String>;
}

/// 取第 `index` 个参数，缺失时返回空字符串
fn arg(args: &[String], index: usize) -> &str {
    args.get(index).map(String::as_str).unwrap_or("")
}

/// 解析分页或区块高度参数，缺省为 0
fn number(args: &[String], index: usize) -> Result<u64> {
    match args.get(index) {
        None => Ok(0),
        Some(raw) => raw
            .parse()
            .map_err(|_| DispatchError::InvalidNumber(raw.clone()).into()),
    }
}

fn pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// 帮助命令
pub struct HelpCommand {
    schema: &'static CommandSchema,
}

#[async_trait]
impl CommandHandler for HelpCommand {
    async fn execute(&self, _ctx: &CommandContext, args: &[String]) -> Result<String> {
        Ok(command_usage(self.schema, arg(args, 0)))
    }
}

/// 完整参考文档命令
pub struct DocsCommand {
    schema: &'static CommandSchema,
}

#[async_trait]
impl CommandHandler for DocsCommand {
    async fn execute(&self, _ctx: &CommandContext, _args: &[String]) -> Result<String> {
        Ok(full_reference(self.schema))
    }
}

/// 只读查询的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    NameInfo,
    NameHistory,
    Zonefile,
    NamesOwned,
    NamespaceInfo,
    NamePrice,
    NamespacePrice,
    AccountBalance,
    AccountHistory,
    AccountAt,
    BlockHeight,
}

/// 单次节点查询命令
pub struct QueryCommand {
    query: Query,
}

impl QueryCommand {
    pub fn new(query: Query) -> Self {
        Self { query }
    }
}

#[async_trait]
impl CommandHandler for QueryCommand {
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<String> {
        let client = &ctx.client;
        let first = arg(args, 0);

        let value = match self.query {
            Query::NameInfo => client.get_name_info(first).await?,
            Query::NameHistory => client.get_name_history(first, number(args, 1)?).await?,
            Query::Zonefile => client.get_zonefile(first).await?,
            Query::NamesOwned => {
                client
                    .get_names_owned(first.strip_prefix("ID-").unwrap_or(first))
                    .await?
            }
            Query::NamespaceInfo => client.get_namespace_info(first).await?,
            Query::NamePrice => client.get_name_price(first).await?,
            Query::NamespacePrice => client.get_namespace_price(first).await?,
            Query::AccountBalance => client.get_account_balance(first).await?,
            Query::AccountHistory => client.get_account_history(first, number(args, 1)?).await?,
            Query::AccountAt => client.get_account_at(first, number(args, 1)?).await?,
            Query::BlockHeight => {
                let info = client.get_blockchain_height().await?;
                match info.get("last_block_processed").or_else(|| info.get("stacks_tip_height")) {
                    Some(height) => height.clone(),
                    None => info,
                }
            }
        };

        pretty(&value)
    }
}

/// 名称查询命令，合并名称记录与 zone file
pub struct LookupCommand;

#[async_trait]
impl CommandHandler for LookupCommand {
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<String> {
        let name = arg(args, 0);
        let (info, zonefile) = tokio::try_join!(
            ctx.client.get_name_info(name),
            ctx.client.get_zonefile(name)
        )?;

        pretty(&json!({
            "name": name,
            "record": info,
            "zonefile": zonefile,
        }))
    }
}

/// 交易广播命令
///
/// `-x` 或 `-e` 时原样输出交易而不发送。
pub struct BroadcastCommand;

#[async_trait]
impl CommandHandler for BroadcastCommand {
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<String> {
        let raw_tx = arg(args, 0);
        if !ctx.options.should_broadcast() {
            log::info!("未广播交易（-x/-e）");
            return Ok(raw_tx.to_string());
        }

        let response = ctx.client.broadcast_transaction(raw_tx).await?;
        pretty(&response)
    }
}

/// 命令注册表
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Box<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// 注册内置处理器
    ///
    /// # 参数
    /// * `schema` - 帮助与文档命令使用的命令表
    pub fn with_builtin_handlers(schema: &'static CommandSchema) -> Self {
        let mut registry = Self::new();
        registry.register("help", Box::new(HelpCommand { schema }));
        registry.register("docs", Box::new(DocsCommand { schema }));
        registry.register("lookup", Box::new(LookupCommand));
        registry.register("broadcast", Box::new(BroadcastCommand));

        let queries = [
            ("whois", Query::NameInfo),
            ("get_blockchain_record", Query::NameInfo),
            ("get_blockchain_history", Query::NameHistory),
            ("get_zonefile", Query::Zonefile),
            ("names", Query::NamesOwned),
            ("get_namespace_blockchain_record", Query::NamespaceInfo),
            ("price", Query::NamePrice),
            ("price_namespace", Query::NamespacePrice),
            ("balance", Query::AccountBalance),
            ("get_account_history", Query::AccountHistory),
            ("get_account_at", Query::AccountAt),
            ("block_height", Query::BlockHeight),
        ];
        for (name, query) in queries {
            registry.register(name, Box::new(QueryCommand::new(query)));
        }

        registry
    }

    /// 注册处理器，同名处理器会被替换
    pub fn register(&mut self, command: &'static str, handler: Box<dyn CommandHandler>) {
        self.handlers.insert(command, handler);
    }

    /// 是否有对应处理器
    pub fn contains(&self, command: &str) -> bool {
        self.handlers.contains_key(command)
    }

    /// 分发命令
    ///
    /// # 参数
    /// * `ctx` - 执行上下文
    /// * `command` - 命令名称
    /// * `args` - 校验通过的参数
    ///
    /// # 返回
    /// * `Result<String>` - 命令输出，未注册的命令返回 `HandlerMissing`
    pub async fn dispatch(
        &self,
        ctx: &CommandContext,
        command: &str,
        args: &[String],
    ) -> Result<String> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| DispatchError::HandlerMissing(command.to_string()))?;

        tracing::debug!("分发命令 {} 到 {} 网络", command, ctx.network.kind);
        handler.execute(ctx, args).await
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builtin;

    #[test]
    fn test_builtin_handlers_are_known_commands() {
        let schema = builtin();
        let registry = CommandRegistry::with_builtin_handlers(schema);
        for name in registry.handlers.keys() {
            assert!(schema.lookup(name).is_some(), "未知命令: {name}");
        }
        assert!(registry.contains("whois"));
        assert!(!registry.contains("register"));
    }

    #[test]
    fn test_docs_needs_no_network() {
        let options = ExecutionOptions::default();
        let network = NetworkSettings::resolve(&crate::config::CliConfig::default(), &options);
        let client = Arc::new(crate::network::HttpNetworkClient::new(&network).unwrap());
        let ctx = CommandContext {
            options,
            network,
            client,
        };

        let registry = CommandRegistry::with_builtin_handlers(builtin());
        let output = tokio_test::block_on(registry.dispatch(&ctx, "docs", &[])).unwrap();
        assert_eq!(output, full_reference(builtin()));
    }

    #[test]
    fn test_number_defaults_to_zero() {
        assert_eq!(number(&[], 1).unwrap(), 0);
        let args = vec!["alice.id".to_string(), "3".to_string()];
        assert_eq!(number(&args, 1).unwrap(), 3);
        let args = vec!["alice.id".to_string(), "x".to_string()];
        assert!(matches!(
            number(&args, 1),
            Err(crate::error::BlockstackCliError::Dispatch(DispatchError::InvalidNumber(ref raw))) if raw == "x"
        ));
    }
}
