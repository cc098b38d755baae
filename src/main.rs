//! # chemsub - 计算化学 SLURM 作业脚本生成器
//!
//! 为 ORCA、Gaussian16 和 MRChem 在 Saga、Fram、Stallo 集群上生成
//! SLURM 提交脚本。输入文件按内容自动归类，资源请求经校验与计费
//! 闸门后组装成集群正确的 `.job` 脚本。
//!
//! ## 子命令
//! - `generate` - 从输入文件生成作业脚本（可选直接提交）
//! - `config`   - 集群配置报告
//! - `test`     - 生成三种代码的最小测试作业
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/  (归类与辅助文件提取)
//!   │     ├── clusters/ (集群配置与计费)
//!   │     ├── script/   (脚本组装)
//!   │     └── models/   (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod clusters;
mod commands;
mod error;
mod models;
mod parsers;
mod script;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
