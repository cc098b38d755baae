//! # Gaussian16 脚本片段
//!
//! Gaussian 由 module 提供，从标准输入读取作业。GAUSS_SCRDIR 指向
//! 当前运行目录，使临时积分文件落在暂存区（或提交目录）而非家目录。
//!
//! ## 依赖关系
//! - 被 `script/mod.rs` 分发
//! - 使用 `models/job.rs`

use crate::models::JobSpecification;
use crate::script::JobScript;

pub struct GaussianScript;

impl JobScript for GaussianScript {
    fn environment(&self, spec: &JobSpecification) -> Vec<String> {
        vec![
            "module purge".to_string(),
            format!("module load {}", spec.cluster.gaussian_module),
            String::new(),
            format!("GAUSSIAN={}", spec.cluster.gaussian_path),
        ]
    }

    fn execution(&self, spec: &JobSpecification) -> Vec<String> {
        vec![
            "export GAUSS_SCRDIR=$PWD".to_string(),
            format!(
                "time $GAUSSIAN < {} > {} 2>&1",
                spec.input_file,
                spec.output_file()
            ),
        ]
    }

    fn artifact_extensions(&self) -> &'static [&'static str] {
        &[".chk"]
    }
}
