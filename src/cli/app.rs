//! 应用程序核心逻辑
//!
//! 串联全局选项、配置加载、日志初始化、命令解析与分发

use crate::argparse::{parse_command_args, parse_options, ParseOutcome, GLOBAL_OPTION_SPEC};
use crate::cli::commands::{CommandContext, CommandRegistry};
use crate::cli::options::ExecutionOptions;
use crate::config::FileConfigLoader;
use crate::error::Result;
use crate::logging::{LogConfig, LoggingSystem};
use crate::network::{HttpNetworkClient, NetworkSettings};
use crate::schema::builtin;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// 执行一次命令行调用
///
/// # 参数
/// * `argv` - 去掉程序名后的命令行参数
///
/// # 返回
/// * `Result<i32>` - 进程退出码；配置或日志初始化失败时返回错误
pub async fn run<S: AsRef<str>>(argv: &[S]) -> Result<i32> {
    let table = parse_options(argv, GLOBAL_OPTION_SPEC);
    let options = ExecutionOptions::from_table(&table)?;

    let config = FileConfigLoader::default()
        .load_or_default(options.config_path.as_deref())
        .await?;

    let logging = LoggingSystem::setup_logging(LogConfig::from_config(&config))?;
    info!("{} v{} 启动", crate::APP_NAME, crate::VERSION);

    let schema = builtin();
    let (command, args) = match parse_command_args(schema, table.remaining.as_slice()) {
        ParseOutcome::Success { command, args } => (command, args),
        failure @ ParseOutcome::Failure { .. } => {
            if let ParseOutcome::Failure { error, .. } = &failure {
                eprintln!("{error}");
            }
            if let Some(usage) = failure.usage(schema) {
                eprintln!("{usage}");
            }
            return Ok(1);
        }
    };

    let network = NetworkSettings::resolve(&config, &options);
    let client = Arc::new(HttpNetworkClient::new(&network)?);
    let ctx = CommandContext {
        options,
        network,
        client,
    };

    let registry = CommandRegistry::with_builtin_handlers(schema);
    let started = Instant::now();
    let result = registry.dispatch(&ctx, &command, &args).await;
    let elapsed = started.elapsed();

    match result {
        Ok(output) => {
            logging.command_log(&command, true, elapsed, None);
            println!("{output}");
            Ok(0)
        }
        Err(e) => {
            let details = e.to_string();
            logging.command_log(&command, false, elapsed, Some(&details));
            error!("命令执行失败: {}", e);
            eprintln!("{e}");
            Ok(1)
        }
    }
}
