//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`、`clusters/`、`parsers/`、`script/`、`utils/`
//! - 子模块: generate, config, test

pub mod config;
pub mod generate;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Generate(args) => generate::execute(args),
        Commands::Config(args) => config::execute(args),
        Commands::Test(args) => test::execute(args),
    }
}
