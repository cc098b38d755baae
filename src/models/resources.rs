//! # SLURM 资源请求模型
//!
//! 定义作业的资源请求：任务布局、内存、时限、邮件通知等，
//! 并集中校验互斥字段与格式约束。
//!
//! ## 校验规则
//! - 内存必须且只能以一种形式给出（整节点 `--mem` 或每核 `--mem-per-cpu`）
//! - 内存值必须携带两字符单位后缀（如 "5GB"）
//! - 时限必须符合 dd-hh:mm:ss
//! - MRChem 启动器命令限定在枚举集合内
//!
//! ## 依赖关系
//! - 被 `models/job.rs`、`clusters/billing.rs` 和 `script/` 使用
//! - 使用 `regex` 校验时限格式

use crate::error::{ChemsubError, Result};
use regex::Regex;

/// 任务布局：按节点分配，或交给调度器平铺放置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskLayout {
    /// 显式节点数 + 每节点任务数
    PerNode { nodes: u32, tasks_per_node: u32 },
    /// 总任务数，节点由调度器决定
    Flat { ntasks: u32 },
}

/// 内存请求的两种互斥形式，值保留用户给出的原始字符串（含单位）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemorySpec {
    /// 整节点总内存（`--mem`）
    Total(String),
    /// 每 CPU 内存（`--mem-per-cpu`）
    PerCpu(String),
}

impl MemorySpec {
    /// 原始内存字符串（含单位后缀）
    pub fn raw(&self) -> &str {
        match self {
            MemorySpec::Total(s) | MemorySpec::PerCpu(s) => s,
        }
    }
}

/// MRChem 作业的启动器命令，限定枚举集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launcher {
    Srun,
    Mpirun,
}

impl Launcher {
    /// 从命令名解析，集合外的值报 `InvalidResourceSpecError`
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "srun" => Ok(Launcher::Srun),
            "mpirun" => Ok(Launcher::Mpirun),
            other => Err(ChemsubError::InvalidResourceSpecError {
                reason: format!(
                    "launcher command must be one of: srun, mpirun (got '{}')",
                    other
                ),
            }),
        }
    }

    /// 生成传给 MRChem `--launcher=` 的命令串
    pub fn command_line(&self, tasks: u32) -> String {
        match self {
            Launcher::Srun => format!("srun -n {}", tasks),
            Launcher::Mpirun => format!("mpirun -np {}", tasks),
        }
    }
}

/// 一个作业的完整资源请求
#[derive(Debug, Clone)]
pub struct ResourceSpec {
    pub layout: TaskLayout,
    pub cpus_per_task: u32,
    pub memory: MemorySpec,
    /// 时限，dd-hh:mm:ss
    pub time: String,
    /// SLURM mail type（原样传入 `--mail-type=`）
    pub mail: String,
    pub partition: Option<String>,
    /// 开发队列作业（`--qos=devel`，优先于 partition）
    pub dev: bool,
}

impl ResourceSpec {
    /// 从可选的互斥字段构造并校验
    pub fn new(
        layout: TaskLayout,
        cpus_per_task: u32,
        memory_total: Option<String>,
        memory_per_cpu: Option<String>,
        time: String,
        mail: String,
        partition: Option<String>,
        dev: bool,
    ) -> Result<Self> {
        let memory = match (memory_total, memory_per_cpu) {
            (Some(_), Some(_)) => {
                return Err(ChemsubError::InvalidResourceSpecError {
                    reason: "memory was given in both total (--memory) and per-CPU \
                             (--mem-per-cpu) form"
                        .to_string(),
                })
            }
            (None, None) => {
                return Err(ChemsubError::InvalidResourceSpecError {
                    reason: "memory must be given in exactly one form \
                             (--memory or --mem-per-cpu)"
                        .to_string(),
                })
            }
            (Some(m), None) => MemorySpec::Total(m),
            (None, Some(m)) => MemorySpec::PerCpu(m),
        };

        parse_memory_value(memory.raw())?;
        validate_time(&time)?;

        let spec = ResourceSpec {
            layout,
            cpus_per_task,
            memory,
            time,
            mail,
            partition,
            dev,
        };

        if spec.total_tasks() == 0 {
            return Err(ChemsubError::InvalidResourceSpecError {
                reason: "at least one task must be requested".to_string(),
            });
        }

        Ok(spec)
    }

    /// 跨所有节点的总任务数
    pub fn total_tasks(&self) -> u32 {
        match self.layout {
            TaskLayout::PerNode {
                nodes,
                tasks_per_node,
            } => nodes * tasks_per_node,
            TaskLayout::Flat { ntasks } => ntasks,
        }
    }
}

/// 剥离两字符单位后缀，解析内存数值。
/// 不做单位换算：计费因子与上限采用与输入相同的单位约定。
pub fn parse_memory_value(raw: &str) -> Result<f64> {
    let chars: Vec<char> = raw.chars().collect();
    let invalid = || ChemsubError::InvalidResourceSpecError {
        reason: format!(
            "memory value '{}' must be a number followed by a two-character \
             unit suffix (e.g. 5GB)",
            raw
        ),
    };

    if chars.len() < 3 {
        return Err(invalid());
    }

    let (value_part, unit_part) = chars.split_at(chars.len() - 2);
    if unit_part[1] != 'B' || !unit_part[0].is_ascii_alphabetic() {
        return Err(invalid());
    }

    value_part
        .iter()
        .collect::<String>()
        .parse::<f64>()
        .map_err(|_| invalid())
}

/// 校验 dd-hh:mm:ss 时限格式
fn validate_time(time: &str) -> Result<()> {
    let pattern = Regex::new(r"^\d{2}-\d{2}:\d{2}:\d{2}$").unwrap();
    if pattern.is_match(time) {
        Ok(())
    } else {
        Err(ChemsubError::InvalidResourceSpecError {
            reason: format!("time limit '{}' must match dd-hh:mm:ss", time),
        })
    }
}
