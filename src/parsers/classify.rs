//! # 输入文件归属判定
//!
//! 根据文件内容判定输入属于哪种计算化学代码。
//!
//! ## 判定规则（按优先级）
//! 1. 出现 MRChem 精度关键字 `world_prec` → MRChem
//! 2. 出现 ORCA 几何块起始符（`* xyz` / `*xyzfile`）→ ORCA
//! 3. 两者皆无 → Gaussian（其语法最缺乏标志性，作为默认）
//!
//! 优先级是有意的决策：同时含两种标记的文件按标记优先级归类，
//! 而不是按多数票。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 使用 `models/code.rs`

use std::fs;
use std::path::Path;

use crate::error::{ChemsubError, Result};
use crate::models::CodeKind;

/// 读取并判定输入文件
pub fn classify_file(path: &Path) -> Result<CodeKind> {
    let content = fs::read_to_string(path).map_err(|e| ChemsubError::ClassificationError {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    classify_content(&content, &path.display().to_string())
}

/// 从文本内容判定归属
pub fn classify_content(content: &str, name: &str) -> Result<CodeKind> {
    if content.trim().is_empty() {
        return Err(ChemsubError::ClassificationError {
            path: name.to_string(),
            reason: "file is empty".to_string(),
        });
    }

    // 标记按优先级逐轮扫描：world_prec 必须压过几何块起始符
    if content.lines().any(is_mrchem_marker) {
        return Ok(CodeKind::Mrchem);
    }

    if content.lines().any(is_orca_marker) {
        return Ok(CodeKind::Orca);
    }

    Ok(CodeKind::Gaussian)
}

/// MRChem 精度关键字
fn is_mrchem_marker(line: &str) -> bool {
    joined_lower(line).starts_with("world_prec")
}

/// ORCA 几何块起始符，覆盖 `* xyz 0 1` 与 `*xyzfile` 两种写法
fn is_orca_marker(line: &str) -> bool {
    joined_lower(line).starts_with("*xyz")
}

/// 去除所有空白并小写，容忍指令内的任意空白
fn joined_lower(line: &str) -> String {
    line.split_whitespace().collect::<String>().to_lowercase()
}
