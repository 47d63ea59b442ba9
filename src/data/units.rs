//! # 尺寸字符串解析
//!
//! 将形如 `"1.5mmx200umx3cm"` 的样品尺寸转换为以米为单位的三个长度。
//! 支持后缀 `um`, `mm`, `nm`, `cm`；无后缀视为已是米。
//!
//! ## 依赖关系
//! - 被 `commands/dims.rs` 使用

use crate::error::{MechError, Result};

/// 单位后缀对应的除数（除法结果正确舍入，`"2mm"` 精确等于 0.002）
fn unit_divisor(suffix: &str) -> Option<f64> {
    match suffix {
        "" => Some(1.0),
        "cm" => Some(1e2),
        "mm" => Some(1e3),
        "um" => Some(1e6),
        "nm" => Some(1e9),
        _ => None,
    }
}

/// 解析单个带单位的长度
pub fn parse_length(input: &str) -> Result<f64> {
    let dim = input.trim();
    let number = dim.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &dim[number.len()..];

    let divisor = unit_divisor(suffix).ok_or_else(|| MechError::UnitParse {
        input: input.to_string(),
    })?;
    let value: f64 = number.trim().parse().map_err(|_| MechError::UnitParse {
        input: input.to_string(),
    })?;

    Ok(value / divisor)
}

/// 解析 `x` 分隔的三维尺寸，返回米
pub fn parse_dimensions(input: &str) -> Result<[f64; 3]> {
    let parts: Vec<&str> = input.split('x').collect();
    if parts.len() != 3 {
        return Err(MechError::UnitParse {
            input: input.to_string(),
        });
    }

    let mut dims = [0.0; 3];
    for (slot, part) in dims.iter_mut().zip(parts) {
        *slot = parse_length(part).map_err(|_| MechError::UnitParse {
            input: input.to_string(),
        })?;
    }
    Ok(dims)
}

/// 对一列尺寸字符串逐个解析，单个失败不影响其他值
pub fn parse_dimension_column<S: AsRef<str>>(values: &[S]) -> Vec<Result<[f64; 3]>> {
    values
        .iter()
        .map(|v| parse_dimensions(v.as_ref()))
        .collect()
}
