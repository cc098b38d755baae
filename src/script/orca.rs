//! # ORCA 脚本片段
//!
//! ORCA 经由 OpenMPI 并行，环境块加载 MPI 模块并把 ORCA 与 MPI
//! 所在目录加入 PATH / LD_LIBRARY_PATH。ORCA 要求用完整路径调用
//! 可执行文件，并行才能正常启动。
//!
//! ## 依赖关系
//! - 被 `script/mod.rs` 分发
//! - 使用 `models/job.rs`

use crate::models::JobSpecification;
use crate::script::JobScript;

pub struct OrcaScript;

impl JobScript for OrcaScript {
    fn environment(&self, spec: &JobSpecification) -> Vec<String> {
        vec![
            "module purge".to_string(),
            format!("module load {}", spec.cluster.mpi_module),
            String::new(),
            format!("ORCA={}", spec.cluster.orca_path),
            format!("MPI={}", spec.cluster.mpi_path),
            String::new(),
            "export PATH=$(dirname $ORCA):$PATH".to_string(),
            "export PATH=$(dirname $MPI):$PATH".to_string(),
            "export LD_LIBRARY_PATH=$(dirname $ORCA):$LD_LIBRARY_PATH".to_string(),
            "export LD_LIBRARY_PATH=$(dirname $MPI):$LD_LIBRARY_PATH".to_string(),
            "export RSH_COMMAND=\"/usr/bin/ssh -x\"".to_string(),
        ]
    }

    fn execution(&self, spec: &JobSpecification) -> Vec<String> {
        vec![format!(
            "time $ORCA {} > {} 2>&1",
            spec.input_file,
            spec.output_file()
        )]
    }

    fn artifact_extensions(&self) -> &'static [&'static str] {
        &[".hess", ".xyz", ".bgw", ".trj"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clusters::ClusterStore;
    use crate::models::{
        AuxiliaryFileRequest, CodeKind, MemorySpec, ResourceSpec, TaskLayout,
    };

    fn spec() -> JobSpecification {
        let profile = ClusterStore::new().lookup("saga").unwrap().clone();
        JobSpecification {
            code: CodeKind::Orca,
            input_file: "H2O.inp".to_string(),
            input_base: "H2O".to_string(),
            output_base: "H2O".to_string(),
            job_name: "H2O".to_string(),
            account: "nn4654k".to_string(),
            cluster: profile,
            resources: ResourceSpec {
                layout: TaskLayout::PerNode {
                    nodes: 1,
                    tasks_per_node: 4,
                },
                cpus_per_task: 1,
                memory: MemorySpec::Total("4GB".to_string()),
                time: "00-00:30:00".to_string(),
                mail: "NONE".to_string(),
                partition: None,
                dev: false,
            },
            launcher: None,
            aux: AuxiliaryFileRequest::default(),
        }
    }

    #[test]
    fn test_environment_loads_mpi_module() {
        let lines = OrcaScript.environment(&spec());
        assert_eq!(lines[0], "module purge");
        assert_eq!(lines[1], "module load OpenMPI/3.1.1-GCC-7.3.0-2.30");
        assert!(lines
            .iter()
            .any(|l| l == "ORCA=/cluster/projects/nn4654k/software/orca_4_2_1/orca"));
    }

    #[test]
    fn test_execution_redirects_to_output() {
        let lines = OrcaScript.execution(&spec());
        assert_eq!(lines, vec!["time $ORCA H2O.inp > H2O.out 2>&1"]);
    }
}
