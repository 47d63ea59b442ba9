//! # Miller 指数解析
//!
//! 接受 `"1 0 0"`, `"(1,0,0)"`, `"[1 -1 0]"`, `"0.5 0.5 1"` 等写法，
//! 以及无分隔的紧凑写法 `"100"`, `"(1-10)"`（每个指数一位数字），
//! 返回分数坐标向量。
//!
//! ## 依赖关系
//! - 被 `mech/row.rs` 使用
//! - 使用 `regex`

use crate::error::{MechError, Result};

use nalgebra::Vector3;
use regex::Regex;
use std::sync::LazyLock;

/// 带符号的整数 / 小数 / 科学计数法
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d+(?:\.\d*)?(?:[eE][-+]?\d+)?").unwrap());

/// 紧凑写法：三个带符号的一位数字，可带括号
static COMPACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[\(\[\{<]?\s*([-+]?\d)([-+]?\d)([-+]?\d)\s*[\)\]\}>]?\s*$").unwrap()
});

/// 解析 Miller 指数为分数坐标
pub fn parse_miller(input: &str) -> Result<Vector3<f64>> {
    if let Some(caps) = COMPACT.captures(input) {
        let digit = |i: usize| caps[i].parse::<f64>().unwrap_or(0.0);
        let v = Vector3::new(digit(1), digit(2), digit(3));
        if v == Vector3::zeros() {
            return Err(MechError::InvalidMiller(input.to_string()));
        }
        return Ok(v);
    }

    let values: Vec<f64> = NUMBER
        .find_iter(input)
        .map(|m| m.as_str().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| MechError::InvalidMiller(input.to_string()))?;

    match values.as_slice() {
        [h, k, l] if *h != 0.0 || *k != 0.0 || *l != 0.0 => Ok(Vector3::new(*h, *k, *l)),
        _ => Err(MechError::InvalidMiller(input.to_string())),
    }
}
