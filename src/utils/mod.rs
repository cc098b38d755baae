//! # 工具函数模块
//!
//! 提供美化输出与交互确认工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: output

pub mod output;
