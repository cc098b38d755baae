//! # 统一错误处理模块
//!
//! 定义 chemsub 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// chemsub 统一错误类型
#[derive(Error, Debug)]
pub enum ChemsubError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 输入文件识别错误
    // ─────────────────────────────────────────────────────────────
    #[error("Cannot classify input file: {path}\nReason: {reason}")]
    ClassificationError { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 辅助文件错误
    // ─────────────────────────────────────────────────────────────
    #[error("Could not locate the {class} directive in input file: {path}")]
    AuxiliaryNotFoundError { class: String, path: String },

    #[error("The {class} file referenced by the input does not exist: {path}")]
    AuxiliaryFileMissingError { class: String, path: String },

    // ─────────────────────────────────────────────────────────────
    // 集群与资源错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown cluster: {name} (supported: saga, fram, stallo)")]
    UnknownClusterError { name: String },

    #[error("Invalid resource specification: {reason}")]
    InvalidResourceSpecError { reason: String },

    #[error("Requested resources cost {cost:.2} billing units, exceeding the cap of {cap:.0}")]
    BillingExceededError { cost: f64, cap: f64 },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("Aborted")]
    Aborted,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ChemsubError>;
