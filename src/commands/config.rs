//! # config 命令实现
//!
//! 打印集群配置报告：所有集群的概览表格，指定集群时附详细条目，
//! `--json` 输出机器可读的完整配置。
//!
//! ## 依赖关系
//! - 使用 `cli/config.rs` 定义的参数
//! - 使用 `clusters/`、`utils/output.rs`

use tabled::{Table, Tabled};

use crate::cli::config::ConfigArgs;
use crate::clusters::{ClusterProfile, ClusterStore};
use crate::error::Result;
use crate::utils::output;

/// 概览表格的一行
#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Cluster")]
    name: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Scratch")]
    scratch: String,
    #[tabled(rename = "Mem directive")]
    mem_directive: String,
    #[tabled(rename = "Billing cap")]
    cap: String,
}

impl ProfileRow {
    fn from_profile(profile: &ClusterProfile) -> Self {
        ProfileRow {
            name: profile.name.clone(),
            account: profile.default_account.clone(),
            scratch: profile
                .scratch_template
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            mem_directive: if profile.supports_mem_directive {
                "yes"
            } else {
                "no"
            }
            .to_string(),
            cap: profile
                .billing
                .cap
                .map(|c| format!("{:.0}", c))
                .unwrap_or_else(|| "unbounded".to_string()),
        }
    }
}

/// 执行 config 命令
pub fn execute(args: ConfigArgs) -> Result<()> {
    let store = ClusterStore::new();

    if args.json {
        let json = match &args.cluster {
            Some(name) => serde_json::to_string_pretty(store.lookup(name)?)?,
            None => serde_json::to_string_pretty(store.all())?,
        };
        println!("{}", json);
        return Ok(());
    }

    output::print_header("Cluster Configuration");
    output::print_info(&format!("Detected cluster: {}", store.detect().name));
    println!();

    let rows: Vec<ProfileRow> = store.all().iter().map(ProfileRow::from_profile).collect();
    println!("{}", Table::new(rows));

    if let Some(name) = &args.cluster {
        let profile = store.lookup(name)?;
        println!();
        output::print_separator();
        println!("MPI module:      {}", profile.mpi_module);
        println!("Gaussian module: {}", profile.gaussian_module);
        println!("MRChem env:      {}", profile.mrchem_env);
        println!("ORCA path:       {}", profile.orca_path);
        println!("MPI path:        {}", profile.mpi_path);
        println!("Gaussian path:   {}", profile.gaussian_path);
        println!("MRChem path:     {}", profile.mrchem_path);
        if let Some(archive) = &profile.persistent_store {
            println!("MRChem archive:  {}", archive);
        }
    }

    Ok(())
}
