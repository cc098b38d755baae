//! # 解析器模块
//!
//! 提供输入文件归属判定与代码自有指令语法中的辅助文件提取。
//! 两者都只做文本处理：文件是否存在由命令层负责检查。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: classify, auxfiles

pub mod auxfiles;
pub mod classify;
