//! # 作业规格模型
//!
//! 把 CLI 覆盖值、集群默认值与代码要求合并为一份完整的作业规格。
//! 规格在每次调用中新建，传给脚本组装器后只读，组装完成即丢弃。
//!
//! ## 合并规则（按序应用）
//! 1. 输出基名未给出时，取输入基名
//! 2. 记账账户未给出时，取集群默认账户
//! 3. 队列显示名未给出时，取输入基名
//! 4. 资源字段保留用户显式给出的值
//!
//! ## 依赖关系
//! - 被 `script/` 和 `commands/` 使用
//! - 使用 `models/code.rs`、`models/resources.rs`、`clusters/`

use std::path::Path;

use crate::clusters::ClusterProfile;
use crate::error::{ChemsubError, Result};
use crate::models::code::CodeKind;
use crate::models::resources::{Launcher, ResourceSpec};

/// 需要暂存到运行目录的辅助文件类别
#[derive(Debug, Clone, Copy, Default)]
pub struct AuxiliaryFileRequest {
    /// ORCA 重启 Hessian（inhessname 指令）
    pub hessian: bool,
    /// ORCA 几何结构文件（*xyzfile 指令）
    pub geometry: bool,
    /// ORCA 复合作业描述文件（%compound 指令）
    pub compound: bool,
    /// ORCA 轨道重启文件（%moinp 指令）
    pub orbitals: bool,
    /// Gaussian 检查点文件（约定名 <基名>.chk，无指令查找）
    pub checkpoint: bool,
}

/// 由命令层解析并检查过存在性的辅助文件路径，供组装器生成暂存拷贝行
#[derive(Debug, Clone, Default)]
pub struct ResolvedAuxiliaries {
    pub files: Vec<String>,
}

/// 一次提交的完整作业规格
#[derive(Debug, Clone)]
pub struct JobSpecification {
    pub code: CodeKind,
    /// 输入文件名（含扩展名）
    pub input_file: String,
    /// 输入基名（无扩展名）
    pub input_base: String,
    /// 输出基名
    pub output_base: String,
    /// 队列显示名（--job-name）
    pub job_name: String,
    pub account: String,
    pub cluster: ClusterProfile,
    pub resources: ResourceSpec,
    /// MRChem 作业的启动器，其他代码为 None
    pub launcher: Option<Launcher>,
    pub aux: AuxiliaryFileRequest,
}

impl JobSpecification {
    /// 合并 CLI 覆盖值、集群默认值与代码要求
    pub fn resolve(
        code: CodeKind,
        input_file: &str,
        output_base: Option<&str>,
        job_name: Option<&str>,
        account: Option<&str>,
        cluster: ClusterProfile,
        resources: ResourceSpec,
        launcher: Option<&str>,
        aux: AuxiliaryFileRequest,
    ) -> Result<Self> {
        let input_base = Path::new(input_file)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                ChemsubError::InvalidArgument(format!("invalid input file name: {}", input_file))
            })?;

        // 启动器只对 MRChem 有意义，且限定在枚举集合内
        let launcher = match code {
            CodeKind::Mrchem => Some(Launcher::parse(launcher.unwrap_or("srun"))?),
            _ => None,
        };

        Ok(JobSpecification {
            code,
            input_file: input_file.to_string(),
            output_base: output_base.unwrap_or(&input_base).to_string(),
            job_name: job_name.unwrap_or(&input_base).to_string(),
            account: account.unwrap_or(&cluster.default_account).to_string(),
            input_base,
            cluster,
            resources,
            launcher,
            aux,
        })
    }

    /// 输出文件名（基名 + 代码的输出扩展名）
    pub fn output_file(&self) -> String {
        format!("{}{}", self.output_base, self.code.output_extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clusters::ClusterStore;
    use crate::models::resources::{TaskLayout, ResourceSpec};

    fn resources() -> ResourceSpec {
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
        .unwrap()
    }

    fn saga() -> ClusterProfile {
        ClusterStore::new().lookup("saga").unwrap().clone()
    }

    #[test]
    fn test_resolve_defaults() {
        let spec = JobSpecification::resolve(
            CodeKind::Orca,
            "H2O.inp",
            None,
            None,
            None,
            saga(),
            resources(),
            None,
            AuxiliaryFileRequest::default(),
        )
        .unwrap();

        assert_eq!(spec.input_base, "H2O");
        assert_eq!(spec.output_base, "H2O");
        assert_eq!(spec.job_name, "H2O");
        assert_eq!(spec.account, "nn4654k");
        assert_eq!(spec.output_file(), "H2O.out");
        assert!(spec.launcher.is_none());
    }

    #[test]
    fn test_resolve_explicit_values_kept() {
        let spec = JobSpecification::resolve(
            CodeKind::Orca,
            "H2O.inp",
            Some("water"),
            Some("my-job"),
            Some("nn1234x"),
            saga(),
            resources(),
            None,
            AuxiliaryFileRequest::default(),
        )
        .unwrap();

        assert_eq!(spec.output_base, "water");
        assert_eq!(spec.job_name, "my-job");
        assert_eq!(spec.account, "nn1234x");
        assert_eq!(spec.output_file(), "water.out");
    }

    #[test]
    fn test_resolve_mrchem_launcher_default() {
        let spec = JobSpecification::resolve(
            CodeKind::Mrchem,
            "h2o.inp",
            None,
            None,
            None,
            saga(),
            resources(),
            None,
            AuxiliaryFileRequest::default(),
        )
        .unwrap();
        assert_eq!(spec.launcher, Some(Launcher::Srun));
    }

    #[test]
    fn test_resolve_mrchem_launcher_outside_set() {
        let result = JobSpecification::resolve(
            CodeKind::Mrchem,
            "h2o.inp",
            None,
            None,
            None,
            saga(),
            resources(),
            Some("aprun"),
            AuxiliaryFileRequest::default(),
        );
        assert!(matches!(
            result,
            Err(ChemsubError::InvalidResourceSpecError { .. })
        ));
    }
}
