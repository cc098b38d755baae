//! # 辅助文件提取
//!
//! 从 ORCA 输入自有的指令语法中提取被引用的文件路径。四条独立的提取
//! 规则各自扫描行序列，匹配类别专属的指令关键字（大小写不敏感、
//! 空白归一化），取行尾 token。
//!
//! 提取是字面规则：取末尾（或倒数第二个）空白分隔 token，并在首尾各
//! 剥离一个字符作为引号处理。含空格的路径因此无法提取；在上游代码的
//! 指令语法得到确认之前不做加固。
//!
//! 本模块不检查文件是否存在，存在性由命令层负责。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 使用
//! - 无外部模块依赖

use std::fmt;

use crate::error::{ChemsubError, Result};

/// 可提取的辅助文件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxiliaryClass {
    /// 重启 Hessian，`inhessname "file.hess"`
    Hessian,
    /// 几何结构，`* xyzfile 0 1 file.xyz`
    Geometry,
    /// 复合作业描述，`%compound "file.cmp" end`（单行）或下一行给出文件名（双行）
    Compound,
    /// 轨道重启，`%moinp "file.bgw"`
    Orbitals,
}

impl fmt::Display for AuxiliaryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuxiliaryClass::Hessian => "Hessian (inhessname)",
            AuxiliaryClass::Geometry => "geometry (*xyzfile)",
            AuxiliaryClass::Compound => "compound (%compound)",
            AuxiliaryClass::Orbitals => "orbital (%moinp)",
        };
        write!(f, "{}", name)
    }
}

/// 按类别提取输入文本引用的文件路径
pub fn extract(content: &str, class: AuxiliaryClass, input_name: &str) -> Result<String> {
    let found = match class {
        AuxiliaryClass::Hessian => extract_hessian(content),
        AuxiliaryClass::Geometry => extract_geometry(content),
        AuxiliaryClass::Compound => extract_compound(content),
        AuxiliaryClass::Orbitals => extract_orbitals(content),
    };

    found.ok_or_else(|| ChemsubError::AuxiliaryNotFoundError {
        class: class.to_string(),
        path: input_name.to_string(),
    })
}

fn extract_hessian(content: &str) -> Option<String> {
    for line in content.lines() {
        if line.trim().to_lowercase().starts_with("inhessname") {
            if let Some(token) = line.split_whitespace().nth(1) {
                return Some(strip_outer(token));
            }
        }
    }
    None
}

fn extract_geometry(content: &str) -> Option<String> {
    for line in content.lines() {
        if joined_lower(line).starts_with("*xyzfile") {
            // 几何指令的文件名不带引号，原样返回
            return line.split_whitespace().last().map(|t| t.to_string());
        }
    }
    None
}

fn extract_compound(content: &str) -> Option<String> {
    let lines: Vec<&str> = content.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        // 单行形式: %compound "foo.cmp" end
        if joined_lower(line).starts_with("%compound") && line.trim().ends_with("end") {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() >= 2 {
                return Some(strip_outer(tokens[tokens.len() - 2]));
            }
        }
        // 双行形式: 文件名在指令的下一行
        else if lower.trim().starts_with('%')
            && lower.contains("compound")
            && !lower.contains("end")
        {
            if let Some(next) = lines.get(i + 1) {
                return Some(strip_outer(next.trim()));
            }
        }
    }
    None
}

fn extract_orbitals(content: &str) -> Option<String> {
    for line in content.lines() {
        if joined_lower(line).starts_with("%moinp") {
            if let Some(token) = line.split_whitespace().last() {
                return Some(strip_outer(token));
            }
        }
    }
    None
}

/// 首尾各剥离一个字符（引号处理的字面规则）
fn strip_outer(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < 2 {
        return String::new();
    }
    chars[1..chars.len() - 1].iter().collect()
}

/// 去除所有空白并小写
fn joined_lower(line: &str) -> String {
    line.split_whitespace().collect::<String>().to_lowercase()
}
