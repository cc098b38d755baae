//! # 数据模型模块
//!
//! 定义作业规格、资源请求和代码类型的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`script/` 和 `commands/` 使用
//! - 子模块: code, resources, job

pub mod code;
pub mod job;
pub mod resources;

pub use code::CodeKind;
pub use job::{AuxiliaryFileRequest, JobSpecification, ResolvedAuxiliaries};
pub use resources::{Launcher, MemorySpec, ResourceSpec, TaskLayout};
