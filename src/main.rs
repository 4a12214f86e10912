//! Blockstack CLI 主程序入口

use anyhow::{Context, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let code = blockstack_cli::cli::run(argv.as_slice())
        .await
        .context("命令行初始化失败")?;

    std::process::exit(code)
}
