//! # 计费校验
//!
//! 由资源请求计算计费单位成本，并与集群上限比较。校验器只给出结论，
//! 是否中止由调用方决定。
//!
//! ## 成本公式
//! - 整节点内存: `factor_mem(partition) * mem + tasks * cpus_per_task`
//! - 每核内存:   `factor_mem(partition) * tasks * cpus_per_task * mem + tasks * cpus_per_task`
//!
//! 内存数值剥离两字符单位后缀后直接参与计算，不做单位换算。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `clusters/mod.rs`、`models/resources.rs`

use crate::clusters::ClusterProfile;
use crate::error::Result;
use crate::models::resources::{parse_memory_value, MemorySpec, ResourceSpec};

/// 计费结论
#[derive(Debug, Clone, Copy)]
pub struct BillingVerdict {
    pub within_cap: bool,
    pub cost: f64,
}

/// 计算成本并与集群上限比较
pub fn validate(
    profile: &ClusterProfile,
    partition: Option<&str>,
    resources: &ResourceSpec,
) -> Result<BillingVerdict> {
    let factor = profile.billing.factor_mem(partition);
    let tasks = f64::from(resources.total_tasks());
    let cpus = f64::from(resources.cpus_per_task);

    let cost = match &resources.memory {
        MemorySpec::Total(raw) => factor * parse_memory_value(raw)? + tasks * cpus,
        MemorySpec::PerCpu(raw) => {
            factor * tasks * cpus * parse_memory_value(raw)? + tasks * cpus
        }
    };

    let within_cap = profile.billing.cap.map_or(true, |cap| cost <= cap);

    Ok(BillingVerdict { within_cap, cost })
}
