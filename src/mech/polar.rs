//! # 极分解
//!
//! 将变形梯度分解为 F = Q·U：
//! 1. C = FᵗF，用对称特征求解器求 λᵢ 与正交特征向量 vᵢ
//! 2. sᵢ = sqrt(|λᵢ|)，U = Σ sᵢ vᵢ ⊗ vᵢ
//! 3. Q = F·U⁻¹
//!
//! 取绝对值只用于吸收接近零的舍入噪声；超出容差的负特征值
//! 记为 `NegativeStretch` 条件。
//!
//! ## 依赖关系
//! - 被 `mech/row.rs` 使用
//! - 使用 `nalgebra::SymmetricEigen`

use crate::error::{MechError, Result};
use crate::models::{Condition, DeformationGradient, StretchRotation, Tolerance};

use super::deform::SINGULAR_EPS;
use nalgebra::{Matrix3, SymmetricEigen};
use std::cmp::Ordering;

/// 对称化，消除矩阵乘法带来的非对称舍入误差
pub(crate) fn symmetrize(m: Matrix3<f64>) -> Matrix3<f64> {
    (m + m.transpose()) * 0.5
}

/// FᵗF 的特征值低于 -tol 时返回 `NegativeStretch`
///
/// FᵗF 半正定，只有数值异常的 F 才会触发。
pub(crate) fn stretch_condition(eigenvalue: f64, tol: Tolerance) -> Option<Condition> {
    (eigenvalue < -tol.value()).then_some(Condition::NegativeStretch { eigenvalue })
}

/// 极分解 F = Q·U
pub fn polar_decompose(f: &DeformationGradient, tol: Tolerance) -> Result<StretchRotation> {
    let c = symmetrize(f.matrix.transpose() * f.matrix);
    let eigen = SymmetricEigen::new(c);

    let mut conditions = Vec::new();
    let mut stretch = Matrix3::zeros();
    let mut principal_stretches = [0.0; 3];

    for i in 0..3 {
        let lambda = eigen.eigenvalues[i];
        conditions.extend(stretch_condition(lambda, tol));

        let s = lambda.abs().sqrt();
        let v = eigen.eigenvectors.column(i).into_owned();
        stretch += v * v.transpose() * s;
        principal_stretches[i] = s;
    }

    principal_stretches.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let smallest = principal_stretches[0];
    let largest = principal_stretches[2];
    if !smallest.is_finite() || smallest <= SINGULAR_EPS * largest {
        return Err(MechError::SingularStretch { stretch: smallest });
    }

    let stretch = symmetrize(stretch);
    let stretch_inv = stretch
        .try_inverse()
        .ok_or(MechError::SingularStretch { stretch: smallest })?;
    let rotation = f.matrix * stretch_inv;

    Ok(StretchRotation {
        stretch,
        rotation,
        principal_stretches,
        conditions,
    })
}
