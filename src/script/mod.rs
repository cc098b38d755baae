//! # SLURM 脚本组装模块
//!
//! 把校验过的作业规格组装成有序的脚本行序列。三种代码的差异通过
//! `JobScript` 接口分发（每种代码一个实现），而不是在组装流程里
//! 反复分支。
//!
//! ## 块顺序（固定且有意义）
//! 指令块 → 环境块 → 暂存块 → 执行块 → 结果块 → 清理块 → 终止符。
//! 调度器要求所有 `#SBATCH` 指令先于任何 shell 逻辑。
//!
//! 组装器是其输入的纯函数：时间戳由调用方传入，同一份规格组装两次
//! 得到完全相同的行序列。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: orca, gaussian, mrchem

pub mod gaussian;
pub mod mrchem;
pub mod orca;

use crate::models::{CodeKind, JobSpecification, MemorySpec, ResolvedAuxiliaries, TaskLayout};

use gaussian::GaussianScript;
use mrchem::MrchemScript;
use orca::OrcaScript;

/// 每种代码各自实现的脚本片段
pub(crate) trait JobScript {
    /// 环境配置块（module 加载或 source 环境脚本）
    fn environment(&self, spec: &JobSpecification) -> Vec<String>;

    /// 执行块，假定当前目录即运行目录
    fn execution(&self, spec: &JobSpecification) -> Vec<String>;

    /// 运行后需要拷回提交目录的产物扩展名
    fn artifact_extensions(&self) -> &'static [&'static str];

    /// 结果块之后的附加处理（如持久化归档），默认无
    fn post_stage(&self, _spec: &JobSpecification) -> Vec<String> {
        Vec::new()
    }
}

fn dispatch(code: CodeKind) -> Box<dyn JobScript> {
    match code {
        CodeKind::Orca => Box::new(OrcaScript),
        CodeKind::Gaussian => Box::new(GaussianScript),
        CodeKind::Mrchem => Box::new(MrchemScript),
    }
}

/// 组装完整脚本。`timestamp` 由调用方生成，仅进入注释块。
pub fn assemble(
    spec: &JobSpecification,
    aux: &ResolvedAuxiliaries,
    timestamp: &str,
) -> Vec<String> {
    let script = dispatch(spec.code);
    let has_scratch = spec.cluster.scratch_template.is_some();

    let mut lines: Vec<String> = Vec::new();

    // 指令块
    lines.push("#! /bin/bash".to_string());
    lines.push(String::new());
    lines.extend(timestamp_block(timestamp));
    lines.push(String::new());
    lines.extend(directive_block(spec));
    lines.push(String::new());

    // 环境块
    lines.extend(script.environment(spec));
    lines.push(String::new());

    // 暂存块：仅在集群定义了暂存目录模板时生成，否则就地执行
    if let Some(template) = &spec.cluster.scratch_template {
        lines.push(format!("SCRATCH={}", template));
        lines.push("mkdir -p $SCRATCH".to_string());
        lines.push(String::new());
        lines.push(format!("cp {} $SCRATCH", spec.input_file));
        for file in &aux.files {
            lines.push(format!("cp {} $SCRATCH", file));
        }
        lines.push("cd $SCRATCH".to_string());
        lines.push(String::new());
    }

    // 执行块
    lines.extend(script.execution(spec));
    lines.push(String::new());

    // 结果块：无暂存目录时文件已在原地，无需拷回
    if has_scratch {
        for ext in script.artifact_extensions() {
            lines.push(format!("cp {}{} $SLURM_SUBMIT_DIR", spec.input_base, ext));
        }
        lines.push(String::new());
    }

    let post = script.post_stage(spec);
    if !post.is_empty() {
        lines.extend(post);
        lines.push(String::new());
    }

    // 清理块：只清理自己创建的暂存目录
    if has_scratch {
        lines.push("rm -rf $SCRATCH".to_string());
        lines.push(String::new());
    }

    lines.push("exit 0".to_string());
    lines
}

/// 生成时间戳注释块
fn timestamp_block(timestamp: &str) -> Vec<String> {
    let line = format!("# File generated {}", timestamp);
    let rule = format!("#{}", "-".repeat(line.len()));
    vec![rule.clone(), line, rule]
}

/// `#SBATCH` 指令块
fn directive_block(spec: &JobSpecification) -> Vec<String> {
    let mut lines = vec![
        format!("#SBATCH --account={}", spec.account),
        format!("#SBATCH --job-name={}", spec.job_name),
        format!("#SBATCH --output={}.log", spec.output_base),
        format!("#SBATCH --error={}.err", spec.output_base),
    ];

    match spec.resources.layout {
        TaskLayout::PerNode {
            nodes,
            tasks_per_node,
        } => {
            lines.push(format!("#SBATCH --nodes={}", nodes));
            lines.push(format!("#SBATCH --ntasks-per-node={}", tasks_per_node));
        }
        TaskLayout::Flat { ntasks } => {
            lines.push(format!("#SBATCH --ntasks={}", ntasks));
        }
    }

    if spec.resources.cpus_per_task > 1 {
        lines.push(format!(
            "#SBATCH --cpus-per-task={}",
            spec.resources.cpus_per_task
        ));
    }

    lines.push(format!("#SBATCH --time={}", spec.resources.time));

    // Fram 整节点分配，不接受按节点内存指令
    if spec.cluster.supports_mem_directive {
        match &spec.resources.memory {
            MemorySpec::Total(m) => lines.push(format!("#SBATCH --mem={}", m)),
            MemorySpec::PerCpu(m) => lines.push(format!("#SBATCH --mem-per-cpu={}", m)),
        }
    }

    lines.push(format!("#SBATCH --mail-type={}", spec.resources.mail));

    // 开发队列标记与显式分区互斥，开发队列优先
    if spec.resources.dev {
        lines.push("#SBATCH --qos=devel".to_string());
    } else if let Some(partition) = &spec.resources.partition {
        lines.push(format!("#SBATCH --partition={}", partition));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clusters::ClusterStore;
    use crate::models::{AuxiliaryFileRequest, CodeKind, ResourceSpec};

    fn spec_on(cluster: &str, code: CodeKind) -> JobSpecification {
        let profile = ClusterStore::new().lookup(cluster).unwrap().clone();
        let input = format!("H2O{}", code.input_extension());
        JobSpecification::resolve(
            code,
            &input,
            None,
            None,
            None,
            profile,
            ResourceSpec::new(
                TaskLayout::PerNode {
                    nodes: 1,
                    tasks_per_node: 4,
                },
                1,
                Some("4GB".to_string()),
                None,
                "00-00:30:00".to_string(),
                "NONE".to_string(),
                None,
                false,
            )
            .unwrap(),
            None,
            AuxiliaryFileRequest::default(),
        )
        .unwrap()
    }

    fn assembled(cluster: &str, code: CodeKind) -> Vec<String> {
        assemble(
            &spec_on(cluster, code),
            &ResolvedAuxiliaries::default(),
            "2020-01-01 12:00:00",
        )
    }

    #[test]
    fn test_directives_precede_shell_logic() {
        let lines = assembled("saga", CodeKind::Orca);
        let last_directive = lines
            .iter()
            .rposition(|l| l.starts_with("#SBATCH"))
            .unwrap();
        let first_shell = lines
            .iter()
            .position(|l| !l.is_empty() && !l.starts_with('#'))
            .unwrap();
        assert!(last_directive < first_shell);
    }

    #[test]
    fn test_memory_directive_exactly_one_form() {
        for cluster in ["saga", "fram", "stallo"] {
            for code in [CodeKind::Orca, CodeKind::Gaussian, CodeKind::Mrchem] {
                let lines = assembled(cluster, code);
                let total = lines
                    .iter()
                    .filter(|l| l.starts_with("#SBATCH --mem="))
                    .count();
                let per_cpu = lines
                    .iter()
                    .filter(|l| l.starts_with("#SBATCH --mem-per-cpu="))
                    .count();
                // 两种内存指令决不混用
                assert!(total == 0 || per_cpu == 0, "{} {:?}", cluster, code);
            }
        }
    }

    #[test]
    fn test_fram_never_emits_memory_directive() {
        for code in [CodeKind::Orca, CodeKind::Gaussian, CodeKind::Mrchem] {
            let lines = assembled("fram", code);
            assert!(!lines.iter().any(|l| l.contains("--mem")), "{:?}", code);
        }
    }

    #[test]
    fn test_saga_end_to_end_directives() {
        let lines = assembled("saga", CodeKind::Orca);
        assert_eq!(
            lines
                .iter()
                .filter(|l| l.as_str() == "#SBATCH --mem=4GB")
                .count(),
            1
        );
        assert_eq!(
            lines
                .iter()
                .filter(|l| l.as_str() == "#SBATCH --ntasks-per-node=4")
                .count(),
            1
        );
        assert!(!lines.iter().any(|l| l.starts_with("#SBATCH --ntasks=")));
        assert!(lines
            .iter()
            .any(|l| l.as_str() == "time $ORCA H2O.inp > H2O.out 2>&1"));
    }

    #[test]
    fn test_flat_layout_emits_ntasks_only() {
        let mut spec = spec_on("saga", CodeKind::Orca);
        spec.resources.layout = TaskLayout::Flat { ntasks: 16 };
        let lines = assemble(&spec, &ResolvedAuxiliaries::default(), "t");
        assert!(lines.iter().any(|l| l.as_str() == "#SBATCH --ntasks=16"));
        assert!(!lines.iter().any(|l| l.starts_with("#SBATCH --nodes=")));
        assert!(!lines
            .iter()
            .any(|l| l.starts_with("#SBATCH --ntasks-per-node=")));
    }

    #[test]
    fn test_dev_takes_precedence_over_partition() {
        let mut spec = spec_on("saga", CodeKind::Orca);
        spec.resources.dev = true;
        spec.resources.partition = Some("bigmem".to_string());
        let lines = assemble(&spec, &ResolvedAuxiliaries::default(), "t");
        assert!(lines.iter().any(|l| l.as_str() == "#SBATCH --qos=devel"));
        assert!(!lines.iter().any(|l| l.starts_with("#SBATCH --partition=")));
    }

    #[test]
    fn test_partition_emitted_without_dev() {
        let mut spec = spec_on("saga", CodeKind::Orca);
        spec.resources.partition = Some("bigmem".to_string());
        let lines = assemble(&spec, &ResolvedAuxiliaries::default(), "t");
        assert!(lines
            .iter()
            .any(|l| l.as_str() == "#SBATCH --partition=bigmem"));
    }

    #[test]
    fn test_scratch_blocks_only_on_scratch_clusters() {
        let stallo = assembled("stallo", CodeKind::Orca);
        assert!(stallo
            .iter()
            .any(|l| l.as_str() == "SCRATCH=/global/work/$USER/$SLURM_JOB_ID"));
        assert!(stallo.iter().any(|l| l.as_str() == "cp H2O.inp $SCRATCH"));
        assert!(stallo.iter().any(|l| l.as_str() == "rm -rf $SCRATCH"));
        assert!(stallo
            .iter()
            .any(|l| l.as_str() == "cp H2O.hess $SLURM_SUBMIT_DIR"));

        let saga = assembled("saga", CodeKind::Orca);
        assert!(!saga.iter().any(|l| l.starts_with("SCRATCH=")));
        assert!(!saga.iter().any(|l| l.contains("$SCRATCH")));
        assert!(!saga.iter().any(|l| l.starts_with("cp ")));
    }

    #[test]
    fn test_auxiliary_files_staged_on_scratch_cluster() {
        let spec = spec_on("stallo", CodeKind::Orca);
        let aux = ResolvedAuxiliaries {
            files: vec!["water.hess".to_string(), "water.xyz".to_string()],
        };
        let lines = assemble(&spec, &aux, "t");
        assert!(lines.iter().any(|l| l.as_str() == "cp water.hess $SCRATCH"));
        assert!(lines.iter().any(|l| l.as_str() == "cp water.xyz $SCRATCH"));
    }

    #[test]
    fn test_assembly_is_pure() {
        let spec = spec_on("saga", CodeKind::Mrchem);
        let aux = ResolvedAuxiliaries::default();
        let first = assemble(&spec, &aux, "2020-01-01 12:00:00");
        let second = assemble(&spec, &aux, "2020-01-01 12:00:00");
        assert_eq!(first, second);
    }

    #[test]
    fn test_terminator_is_last_line() {
        for cluster in ["saga", "fram", "stallo"] {
            let lines = assembled(cluster, CodeKind::Orca);
            assert_eq!(lines.last().map(|s| s.as_str()), Some("exit 0"));
        }
    }
}
