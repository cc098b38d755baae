//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `generate`: 从输入文件生成 SLURM 作业脚本
//! - `config`: 显示集群配置报告
//! - `test`: 生成三种代码的最小测试作业
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: generate, config, test

pub mod config;
pub mod generate;

use clap::{Parser, Subcommand};

/// chemsub - 计算化学 SLURM 作业脚本生成器
#[derive(Parser)]
#[command(name = "chemsub")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Generate SLURM job files for ORCA, Gaussian16, and MRChem on Saga, Fram, and Stallo",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a SLURM job file from a code input file
    Generate(generate::GenerateArgs),

    /// Show the cluster configuration report
    Config(config::ConfigArgs),

    /// Generate minimal test inputs and job files for all three codes
    Test(test::TestArgs),
}
