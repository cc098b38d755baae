//! # MRChem 脚本片段
//!
//! MRChem 的环境经由 source 环境脚本配置，不走 module 指令。执行时把
//! 启动器命令串（srun/mpirun + 任务数）经 `--launcher=` 传给 MRChem，
//! 由它自己拉起并行进程。
//!
//! 运行产生的 orbitals/ 与 checkpoint/ 目录归档到集群的持久化存储，
//! 目标路径写入提交目录下的哨兵文件，方便用户事后定位。
//!
//! ## 依赖关系
//! - 被 `script/mod.rs` 分发
//! - 使用 `models/job.rs`、`models/resources.rs`

use crate::models::{JobSpecification, Launcher};
use crate::script::JobScript;

pub struct MrchemScript;

impl JobScript for MrchemScript {
    fn environment(&self, spec: &JobSpecification) -> Vec<String> {
        vec![
            format!("source {}", spec.cluster.mrchem_env),
            String::new(),
            format!("MRCHEM={}", spec.cluster.mrchem_path),
        ]
    }

    fn execution(&self, spec: &JobSpecification) -> Vec<String> {
        // 规格解析保证 MRChem 作业必有启动器
        let launcher = spec.launcher.unwrap_or(Launcher::Srun);
        vec![format!(
            "time $MRCHEM --launcher='{}' {} > {} 2>&1",
            launcher.command_line(spec.resources.total_tasks()),
            spec.input_file,
            spec.output_file()
        )]
    }

    fn artifact_extensions(&self) -> &'static [&'static str] {
        &[".json"]
    }

    fn post_stage(&self, spec: &JobSpecification) -> Vec<String> {
        let store = match &spec.cluster.persistent_store {
            Some(store) => store,
            None => return Vec::new(),
        };

        vec![
            format!("ARCHIVE={}/$SLURM_JOB_ID", store),
            "mkdir -p $ARCHIVE".to_string(),
            "cp -r orbitals $ARCHIVE/orbitals".to_string(),
            format!(
                "echo $ARCHIVE/orbitals > $SLURM_SUBMIT_DIR/{}.orbitals.loc",
                spec.input_base
            ),
            "cp -r checkpoint $ARCHIVE/checkpoint".to_string(),
            format!(
                "echo $ARCHIVE/checkpoint > $SLURM_SUBMIT_DIR/{}.checkpoint.loc",
                spec.input_base
            ),
        ]
    }
}
