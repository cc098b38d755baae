//! # config 子命令 CLI 定义
//!
//! 集群配置报告的参数。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/config.rs`

use clap::Args;

/// config 子命令参数
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Show the detailed profile of this cluster only
    #[arg(short = 'u', long)]
    pub cluster: Option<String>,

    /// Dump the profiles as JSON
    #[arg(long)]
    pub json: bool,
}
