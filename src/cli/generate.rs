//! # generate 子命令 CLI 定义
//!
//! 生成单个 SLURM 作业脚本的全部命令行参数。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/generate.rs`

use clap::Args;
use std::path::PathBuf;

/// generate 子命令参数
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Name of the input file, with extension (e.g. H2O.inp)
    #[arg(short, long)]
    pub input: String,

    /// Path to the job directory
    #[arg(short, long, default_value = ".")]
    pub destination: PathBuf,

    /// Base name of the output file [default: input base name]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Cluster to generate for [default: auto-detected from hostname]
    #[arg(short = 'u', long)]
    pub cluster: Option<String>,

    // ─────────────────────────────────────────────────────────────
    // SLURM options
    // ─────────────────────────────────────────────────────────────
    /// Account to charge on the cluster [default: the cluster's project account]
    #[arg(short, long)]
    pub account: Option<String>,

    /// Job name shown in the queue [default: input base name]
    #[arg(short = 'J', long)]
    pub job_name: Option<String>,

    /// Number of nodes
    #[arg(short, long, default_value_t = 1)]
    pub nodes: u32,

    /// Tasks per node (node-local layout)
    #[arg(short = 'T', long, default_value_t = 10)]
    pub ntasks_per_node: u32,

    /// Total task count placed by the scheduler (replaces --nodes/--ntasks-per-node)
    #[arg(short = 'N', long, conflicts_with_all = ["nodes", "ntasks_per_node"])]
    pub ntasks: Option<u32>,

    /// CPUs per task
    #[arg(short = 'p', long, default_value_t = 1)]
    pub cpus_per_task: u32,

    /// Total memory per node, with unit [default: 5GB unless --mem-per-cpu is given]
    #[arg(short, long)]
    pub memory: Option<String>,

    /// Memory per CPU, with unit
    #[arg(long)]
    pub mem_per_cpu: Option<String>,

    /// Time limit [dd-hh:mm:ss]
    #[arg(short, long, default_value = "00-00:30:00")]
    pub time: String,

    /// SLURM mail type
    #[arg(short = 'M', long, default_value = "NONE")]
    pub mail: String,

    /// Partition to submit to
    #[arg(short = 'P', long)]
    pub partition: Option<String>,

    /// Launcher command for MRChem jobs {srun, mpirun}
    #[arg(long, default_value = "srun")]
    pub launcher: String,

    // ─────────────────────────────────────────────────────────────
    // Auxiliary file staging
    // ─────────────────────────────────────────────────────────────
    /// Stage the .hess file referenced by inhessname (ORCA)
    #[arg(long)]
    pub chess: bool,

    /// Stage the .xyz file referenced by *xyzfile (ORCA)
    #[arg(long)]
    pub cxyz: bool,

    /// Stage the .cmp file referenced by %compound (ORCA)
    #[arg(long)]
    pub ccomp: bool,

    /// Stage the .bgw file referenced by %moinp (ORCA)
    #[arg(long)]
    pub cbgw: bool,

    /// Stage the .chk checkpoint file (Gaussian)
    #[arg(long)]
    pub cchk: bool,

    // ─────────────────────────────────────────────────────────────
    // Execution control
    // ─────────────────────────────────────────────────────────────
    /// Generate a job suitable for the development queue
    #[arg(short = 'D', long)]
    pub dev: bool,

    /// Run in silent mode
    #[arg(short = 'S', long)]
    pub silent: bool,

    /// Submit the job to the queue after generation
    #[arg(short = 'X', long)]
    pub execute: bool,

    /// Overwrite without asking and proceed past the billing cap
    #[arg(short, long)]
    pub force: bool,
}
