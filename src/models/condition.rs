//! # 可报告条件与容差
//!
//! 可报告条件不会中止当前数据行：结果照常输出，只是附带标记，
//! 由调用者决定如何处置（记录、标记或排除）。
//!
//! ## 依赖关系
//! - 被 `mech/` 产生
//! - 被 `commands/calc.rs` 汇总

use std::fmt;

/// 默认比较容差（绝对值）
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// 浮点比较容差
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance(pub f64);

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance(DEFAULT_TOLERANCE)
    }
}

impl Tolerance {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// |x - y| <= tol
    pub fn eq(&self, x: f64, y: f64) -> bool {
        (x - y).abs() <= self.0
    }

    /// x <= y + tol
    pub fn le(&self, x: f64, y: f64) -> bool {
        x <= y + self.0
    }

    /// x >= y - tol
    pub fn ge(&self, x: f64, y: f64) -> bool {
        x >= y - self.0
    }
}

/// 可报告条件
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// 特征值不满足 lam1 <= 1, lam2 = 1, lam3 >= 1
    CompatibilityViolation { lambdas: [f64; 3] },
    /// C 为单位阵：F 与 G 表示同一变形
    TrivialTransformation,
    /// FᵗF 出现超出容差的负特征值（非物理的 F）
    NegativeStretch { eigenvalue: f64 },
    /// det F <= 0
    OrientationReversal { det: f64 },
}

impl Condition {
    /// 条件类别的稳定短名
    pub fn kind(&self) -> &'static str {
        match self {
            Condition::CompatibilityViolation { .. } => "compatibility_violation",
            Condition::TrivialTransformation => "trivial_transformation",
            Condition::NegativeStretch { .. } => "negative_stretch",
            Condition::OrientationReversal { .. } => "orientation_reversal",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::CompatibilityViolation { lambdas } => write!(
                f,
                "eigenvalues do not satisfy kinematic compatibility \
                 (lam1 = {:.6}, lam2 = {:.6}, lam3 = {:.6})",
                lambdas[0], lambdas[1], lambdas[2]
            ),
            Condition::TrivialTransformation => {
                write!(f, "C tensor is the identity (no relative transformation)")
            }
            Condition::NegativeStretch { eigenvalue } => {
                write!(f, "negative eigenvalue of FᵗF: {:.3e}", eigenvalue)
            }
            Condition::OrientationReversal { det } => {
                write!(f, "deformation does not preserve orientation (det F = {:.6})", det)
            }
        }
    }
}

/// 将条件列表拼接为 `;` 分隔的类别字符串
pub fn join_kinds(conditions: &[Condition]) -> String {
    conditions
        .iter()
        .map(|c| c.kind())
        .collect::<Vec<_>>()
        .join(";")
}
