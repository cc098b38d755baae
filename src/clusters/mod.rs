//! # 集群配置模块
//!
//! Saga、Fram、Stallo 三个集群的静态环境事实：模块版本、可执行文件路径、
//! 暂存目录模板、记账账户与计费策略。配置在启动时构建一次，随后只读；
//! 只有集群软硬件变更时才会修改。
//!
//! 集群间差异（是否支持内存指令、是否显式建暂存目录）建模为配置上的
//! 能力字段，新集群只需增加一份配置，不需要改动组装器。
//!
//! ## 依赖关系
//! - 被 `models/`、`script/` 和 `commands/` 使用
//! - 使用 `gethostname` 做主机名自动识别
//! - 子模块: billing

pub mod billing;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{ChemsubError, Result};

/// 单集群的计费策略。无计费模型的集群 cap 为 None，检查恒通过。
#[derive(Debug, Clone, Serialize)]
pub struct BillingPolicy {
    /// 按分区的内存计费因子
    pub factors: BTreeMap<String, f64>,
    /// 未列出分区使用的因子
    pub default_factor: f64,
    /// 计费单位上限，None 表示不设限
    pub cap: Option<f64>,
}

impl BillingPolicy {
    /// 不设限的计费策略（Fram、Stallo）
    pub fn unbounded() -> Self {
        BillingPolicy {
            factors: BTreeMap::new(),
            default_factor: 0.0,
            cap: None,
        }
    }

    /// 分区的内存计费因子
    pub fn factor_mem(&self, partition: Option<&str>) -> f64 {
        partition
            .and_then(|p| self.factors.get(p).copied())
            .unwrap_or(self.default_factor)
    }
}

/// 单个集群的环境事实
#[derive(Debug, Clone, Serialize)]
pub struct ClusterProfile {
    pub name: String,
    /// ORCA 依赖的 MPI 模块
    pub mpi_module: String,
    pub gaussian_module: String,
    /// MRChem 环境配置脚本（source 而非 module load）
    pub mrchem_env: String,
    pub orca_path: String,
    pub mpi_path: String,
    pub gaussian_path: String,
    pub mrchem_path: String,
    /// 暂存目录模板；None 表示就地执行，不做暂存拷贝
    pub scratch_template: Option<String>,
    pub default_account: String,
    /// Fram 整节点分配，不支持按节点内存指令
    pub supports_mem_directive: bool,
    /// MRChem 轨道/检查点的持久化存储根目录
    pub persistent_store: Option<String>,
    pub billing: BillingPolicy,
}

/// 静态集群配置表，启动时构建一次
#[derive(Debug, Clone)]
pub struct ClusterStore {
    profiles: Vec<ClusterProfile>,
}

impl ClusterStore {
    pub fn new() -> Self {
        ClusterStore {
            profiles: vec![saga(), fram(), stallo()],
        }
    }

    /// 按标识符查找，集合外的标识符报 `UnknownClusterError`
    pub fn lookup(&self, name: &str) -> Result<&ClusterProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ChemsubError::UnknownClusterError {
                name: name.to_string(),
            })
    }

    /// 根据主机名自动选择集群，无法识别时退回 saga
    pub fn detect(&self) -> &ClusterProfile {
        let hostname = gethostname::gethostname().to_string_lossy().to_string();
        self.detect_from(&hostname)
    }

    /// 主机名子串匹配（与 detect 分离以便测试）
    pub fn detect_from(&self, hostname: &str) -> &ClusterProfile {
        let name = if hostname.contains("stallo") {
            "stallo"
        } else if hostname.contains("fram") {
            "fram"
        } else {
            "saga"
        };
        // 三个内置配置必然存在
        self.lookup(name).unwrap()
    }

    pub fn all(&self) -> &[ClusterProfile] {
        &self.profiles
    }
}

impl Default for ClusterStore {
    fn default() -> Self {
        Self::new()
    }
}

fn saga() -> ClusterProfile {
    let mut factors = BTreeMap::new();
    factors.insert("normal".to_string(), 0.2145918);
    factors.insert("bigmem".to_string(), 0.1002002);

    ClusterProfile {
        name: "saga".to_string(),
        mpi_module: "OpenMPI/3.1.1-GCC-7.3.0-2.30".to_string(),
        gaussian_module: "Gaussian/g16_B.01".to_string(),
        mrchem_env: "/cluster/projects/nn4654k/mrchem/mrchem.bashrc".to_string(),
        orca_path: "/cluster/projects/nn4654k/software/orca_4_2_1/orca".to_string(),
        mpi_path: "/cluster/software/OpenMPI/3.1.1-GCC-7.3.0-2.30/bin/mpirun".to_string(),
        gaussian_path: "g16".to_string(),
        mrchem_path: "/cluster/projects/nn4654k/software/mrchem/bin/mrchem".to_string(),
        scratch_template: None,
        default_account: "nn4654k".to_string(),
        supports_mem_directive: true,
        persistent_store: Some("/cluster/projects/nn4654k/$USER/mrchem-archive".to_string()),
        billing: BillingPolicy {
            factors,
            default_factor: 0.2145918,
            cap: Some(256.0),
        },
    }
}

fn fram() -> ClusterProfile {
    ClusterProfile {
        name: "fram".to_string(),
        mpi_module: "OpenMPI/3.1.3-GCC-8.2.0-2.31.1".to_string(),
        gaussian_module: "Gaussian/g16_B.01".to_string(),
        mrchem_env: "/cluster/projects/nn4654k/mrchem/mrchem.bashrc".to_string(),
        orca_path: "/cluster/projects/nn4654k/software/orca_4_2_1/orca".to_string(),
        mpi_path: "/cluster/software/OpenMPI/3.1.3-GCC-8.2.0-2.31.1/bin/mpirun".to_string(),
        gaussian_path: "g16".to_string(),
        mrchem_path: "/cluster/projects/nn4654k/software/mrchem/bin/mrchem".to_string(),
        scratch_template: None,
        default_account: "nn4654k".to_string(),
        supports_mem_directive: false,
        persistent_store: Some("/cluster/projects/nn4654k/$USER/mrchem-archive".to_string()),
        billing: BillingPolicy::unbounded(),
    }
}

fn stallo() -> ClusterProfile {
    ClusterProfile {
        name: "stallo".to_string(),
        mpi_module: "OpenMPI/3.1.3-GCC-8.2.0-2.31.1".to_string(),
        gaussian_module: "Gaussian/16.B.01".to_string(),
        mrchem_env: "/global/work/nn4654k/mrchem/mrchem.bashrc".to_string(),
        orca_path: "/global/work/nn4654k/software/orca_4_2_1/orca".to_string(),
        mpi_path: "/global/hds/software/cpu/eb3/OpenMPI/3.1.3-GCC-8.2.0-2.31.1/bin/mpirun"
            .to_string(),
        gaussian_path: "g16".to_string(),
        mrchem_path: "/global/work/nn4654k/software/mrchem/bin/mrchem".to_string(),
        scratch_template: Some("/global/work/$USER/$SLURM_JOB_ID".to_string()),
        default_account: "nn4654k".to_string(),
        supports_mem_directive: true,
        persistent_store: Some("/global/work/$USER/mrchem-archive".to_string()),
        billing: BillingPolicy::unbounded(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_clusters() {
        let store = ClusterStore::new();
        assert_eq!(store.lookup("saga").unwrap().name, "saga");
        assert_eq!(store.lookup("fram").unwrap().name, "fram");
        assert_eq!(store.lookup("stallo").unwrap().name, "stallo");
    }

    #[test]
    fn test_lookup_unknown_cluster() {
        let store = ClusterStore::new();
        assert!(matches!(
            store.lookup("betzy"),
            Err(ChemsubError::UnknownClusterError { .. })
        ));
    }

    #[test]
    fn test_detect_from_hostname() {
        let store = ClusterStore::new();
        assert_eq!(store.detect_from("login-1.stallo.uit.no").name, "stallo");
        assert_eq!(store.detect_from("fram.sigma2.no").name, "fram");
        assert_eq!(store.detect_from("login-3.saga.sigma2.no").name, "saga");
        // 无法识别时退回 saga
        assert_eq!(store.detect_from("my-laptop").name, "saga");
    }

    #[test]
    fn test_capability_flags() {
        let store = ClusterStore::new();
        assert!(!store.lookup("fram").unwrap().supports_mem_directive);
        assert!(store.lookup("saga").unwrap().scratch_template.is_none());
        assert!(store.lookup("stallo").unwrap().scratch_template.is_some());
    }

    #[test]
    fn test_factor_mem_lookup() {
        let store = ClusterStore::new();
        let saga = store.lookup("saga").unwrap();
        assert!((saga.billing.factor_mem(Some("normal")) - 0.2145918).abs() < 1e-12);
        assert!((saga.billing.factor_mem(Some("bigmem")) - 0.1002002).abs() < 1e-12);
        // 未列出的分区与未给出分区均用默认因子
        assert!((saga.billing.factor_mem(Some("hugemem")) - 0.2145918).abs() < 1e-12);
        assert!((saga.billing.factor_mem(None) - 0.2145918).abs() < 1e-12);
    }

    #[test]
    fn test_profiles_serialize() {
        let store = ClusterStore::new();
        let json = serde_json::to_string(store.all()).unwrap();
        assert!(json.contains("\"saga\""));
        assert!(json.contains("nn4654k"));
    }
}
