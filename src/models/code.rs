//! # 计算化学代码类型
//!
//! 三种受支持的计算化学代码，以及各自的文件命名约定。
//! 输入文件的归属由 `parsers/classify.rs` 根据内容判定，判定后不可变。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`script/` 和 `commands/` 使用
//! - 无外部模块依赖

use serde::Serialize;

/// 受支持的计算化学代码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CodeKind {
    /// ORCA 电子结构程序
    Orca,
    /// Gaussian16 电子结构程序
    Gaussian,
    /// MRChem 多分辨率程序
    Mrchem,
}

impl CodeKind {
    /// 用户可见的代码名称
    pub fn display_name(&self) -> &'static str {
        match self {
            CodeKind::Orca => "ORCA",
            CodeKind::Gaussian => "Gaussian16",
            CodeKind::Mrchem => "MRChem",
        }
    }

    /// 输入文件扩展名（Gaussian 习惯用 .com，其余用 .inp）
    pub fn input_extension(&self) -> &'static str {
        match self {
            CodeKind::Gaussian => ".com",
            _ => ".inp",
        }
    }

    /// 输出文件扩展名
    pub fn output_extension(&self) -> &'static str {
        ".out"
    }
}
