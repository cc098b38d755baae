//! # generate 命令实现
//!
//! 生成单个 SLURM 作业脚本的完整流程。
//!
//! ## 流程
//! 1. 选定集群（显式覆盖或主机名自动识别）
//! 2. 读取输入并判定代码归属
//! 3. 合并出作业规格并校验资源
//! 4. 计费闸门（--force 可越过）
//! 5. 解析辅助文件并检查存在性
//! 6. 组装脚本、写盘，可选提交
//!
//! 可选辅助文件缺失降级为警告；主输入与 Hessian 缺失则中止。
//!
//! ## 依赖关系
//! - 使用 `cli/generate.rs` 定义的参数
//! - 使用 `clusters/`、`parsers/`、`script/`、`utils/output.rs`

use std::fs;
use std::path::Path;
use std::process::Command;

use chrono::Local;

use crate::cli::generate::GenerateArgs;
use crate::clusters::{billing, ClusterStore};
use crate::error::{ChemsubError, Result};
use crate::models::{
    AuxiliaryFileRequest, CodeKind, JobSpecification, ResolvedAuxiliaries, ResourceSpec,
    TaskLayout,
};
use crate::parsers::auxfiles::{self, AuxiliaryClass};
use crate::parsers::classify;
use crate::script;
use crate::utils::output;

/// 执行 generate 命令
pub fn execute(args: GenerateArgs) -> Result<()> {
    let store = ClusterStore::new();
    let profile = match &args.cluster {
        Some(name) => store.lookup(name)?.clone(),
        None => store.detect().clone(),
    };

    ensure_destination(&args.destination, args.force)?;

    let input_path = args.destination.join(&args.input);
    let code = classify::classify_file(&input_path)?;
    if !args.silent {
        output::print_info(&format!("{} input file detected.", code.display_name()));
    }

    let resources = build_resources(&args)?;
    let aux = AuxiliaryFileRequest {
        hessian: args.chess,
        geometry: args.cxyz,
        compound: args.ccomp,
        orbitals: args.cbgw,
        checkpoint: args.cchk,
    };

    let spec = JobSpecification::resolve(
        code,
        &args.input,
        args.output.as_deref(),
        args.job_name.as_deref(),
        args.account.as_deref(),
        profile,
        resources,
        Some(&args.launcher),
        aux,
    )?;

    // 计费闸门：校验器只给结论，继续或中止在这里决定
    let verdict = billing::validate(
        &spec.cluster,
        spec.resources.partition.as_deref(),
        &spec.resources,
    )?;
    if let Some(cap) = spec.cluster.billing.cap {
        if !args.silent {
            output::print_info(&format!(
                "Billing estimate: {:.2} units (cap {:.0})",
                verdict.cost, cap
            ));
        }
        if !verdict.within_cap {
            if args.force {
                output::print_warning(&format!(
                    "Billing cost {:.2} exceeds the cap of {:.0}, proceeding (--force)",
                    verdict.cost, cap
                ));
            } else {
                return Err(ChemsubError::BillingExceededError {
                    cost: verdict.cost,
                    cap,
                });
            }
        }
    }

    let staged = resolve_auxiliaries(&input_path, &spec, &args.destination)?;

    let job_file = format!("{}.job", spec.input_base);
    let job_path = args.destination.join(&job_file);
    if job_path.is_file() && !args.force {
        let question = format!(
            "The job file \"{}\" exists. Do you want to overwrite it?",
            job_path.display()
        );
        if !output::confirm(&question) {
            return Err(ChemsubError::Aborted);
        }
    }

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let lines = script::assemble(&spec, &staged, &timestamp);
    write_lines(&job_path, &lines)?;

    if !args.silent {
        output::print_success(&format!("Generated {}", job_path.display()));
    }

    if args.execute {
        submit(&args.destination, &job_file, args.silent)?;
    }

    Ok(())
}

/// 目的目录不存在时询问是否创建，--force 直接创建
pub(crate) fn ensure_destination(dest: &Path, force: bool) -> Result<()> {
    if dest.is_dir() {
        return Ok(());
    }

    if !force {
        let question = format!(
            "The directory \"{}\" does not exist. Do you want to create it?",
            dest.display()
        );
        if !output::confirm(&question) {
            return Err(ChemsubError::Aborted);
        }
    }

    fs::create_dir_all(dest).map_err(|e| ChemsubError::FileWriteError {
        path: dest.display().to_string(),
        source: e,
    })?;
    output::print_info(&format!("Created \"{}\"", dest.display()));
    Ok(())
}

/// 从 CLI 参数构造资源请求
fn build_resources(args: &GenerateArgs) -> Result<ResourceSpec> {
    let layout = match args.ntasks {
        Some(ntasks) => TaskLayout::Flat { ntasks },
        None => TaskLayout::PerNode {
            nodes: args.nodes,
            tasks_per_node: args.ntasks_per_node,
        },
    };

    // 记录在 CLI 帮助里的默认值：两种内存形式都未给出时取 5GB 总内存
    let (memory_total, memory_per_cpu) = match (args.memory.clone(), args.mem_per_cpu.clone()) {
        (None, None) => (Some("5GB".to_string()), None),
        other => other,
    };

    ResourceSpec::new(
        layout,
        args.cpus_per_task,
        memory_total,
        memory_per_cpu,
        args.time.clone(),
        args.mail.clone(),
        args.partition.clone(),
        args.dev,
    )
}

/// 解析请求的辅助文件并检查存在性。
/// Hessian 缺失中止（重启作业没有它毫无意义），其余类别降级为警告。
fn resolve_auxiliaries(
    input_path: &Path,
    spec: &JobSpecification,
    dest: &Path,
) -> Result<ResolvedAuxiliaries> {
    let mut staged = ResolvedAuxiliaries::default();

    if spec.code == CodeKind::Orca {
        let requested = [
            (spec.aux.hessian, AuxiliaryClass::Hessian),
            (spec.aux.geometry, AuxiliaryClass::Geometry),
            (spec.aux.compound, AuxiliaryClass::Compound),
            (spec.aux.orbitals, AuxiliaryClass::Orbitals),
        ];

        if requested.iter().any(|(wanted, _)| *wanted) {
            let content =
                fs::read_to_string(input_path).map_err(|e| ChemsubError::FileReadError {
                    path: input_path.display().to_string(),
                    source: e,
                })?;

            for (wanted, class) in requested {
                if !wanted {
                    continue;
                }
                let file = auxfiles::extract(&content, class, &spec.input_file)?;
                if !dest.join(&file).is_file() {
                    if class == AuxiliaryClass::Hessian {
                        return Err(ChemsubError::AuxiliaryFileMissingError {
                            class: class.to_string(),
                            path: file,
                        });
                    }
                    output::print_warning(&format!(
                        "The {} file \"{}\" does not exist yet, staging may fail",
                        class, file
                    ));
                }
                staged.files.push(file);
            }
        }
    }

    // Gaussian 检查点按约定名暂存，无指令查找
    if spec.code == CodeKind::Gaussian && spec.aux.checkpoint {
        let file = format!("{}.chk", spec.input_base);
        if !dest.join(&file).is_file() {
            output::print_warning(&format!(
                "The checkpoint file \"{}\" does not exist yet, staging may fail",
                file
            ));
        }
        staged.files.push(file);
    }

    Ok(staged)
}

/// 写出脚本行序列，逐行换行符结尾
pub(crate) fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content).map_err(|e| ChemsubError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })
}

/// 在目的目录调用 sbatch 提交
pub(crate) fn submit(dest: &Path, job_file: &str, silent: bool) -> Result<()> {
    match Command::new("sbatch").arg(job_file).current_dir(dest).output() {
        Ok(out) if out.status.success() => {
            if !silent {
                output::print_success(&format!(
                    "Submitted: {}",
                    String::from_utf8_lossy(&out.stdout).trim()
                ));
            }
            Ok(())
        }
        Ok(out) => Err(ChemsubError::CommandFailed {
            command: format!("sbatch {}", job_file),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        }),
        Err(e) => Err(ChemsubError::CommandFailed {
            command: format!("sbatch {}", job_file),
            stderr: e.to_string(),
        }),
    }
}
