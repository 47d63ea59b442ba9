//! # 变形梯度
//!
//! F = deformed · reference⁻¹，是晶体学测量与连续介质力学之间的唯一桥梁。
//! 通过 LU 分解求解 referenceᵗ·Fᵗ = deformedᵗ，而不是显式求逆。
//!
//! ## 依赖关系
//! - 被 `mech/row.rs`, `mech/compat.rs` 使用
//! - 使用 `nalgebra`

use crate::error::{MechError, Result};
use crate::models::{Condition, DeformationGradient, LatticeMatrix};

use nalgebra::Matrix3;

/// 相对奇异性阈值：|det| <= SINGULAR_EPS * 列范数之积
pub const SINGULAR_EPS: f64 = 1e-12;

/// 检查矩阵是否可逆（按列范数归一化的行列式）
pub fn check_invertible(m: &Matrix3<f64>) -> Result<f64> {
    let det = m.determinant();
    let scale: f64 = m.column_iter().map(|col| col.norm()).product();

    if !det.is_finite() || scale == 0.0 || det.abs() <= SINGULAR_EPS * scale {
        return Err(MechError::SingularLattice { det });
    }
    Ok(det)
}

/// 矩阵求逆，奇异时返回 `SingularLattice`
pub fn invert(m: &Matrix3<f64>) -> Result<Matrix3<f64>> {
    let det = check_invertible(m)?;
    m.try_inverse().ok_or(MechError::SingularLattice { det })
}

/// 计算从参考晶格到变形晶格的变形梯度
pub fn deformation_gradient(
    reference: &LatticeMatrix,
    deformed: &LatticeMatrix,
) -> Result<DeformationGradient> {
    let det = check_invertible(&reference.matrix)?;

    let ft = reference
        .matrix
        .transpose()
        .lu()
        .solve(&deformed.matrix.transpose())
        .ok_or(MechError::SingularLattice { det })?;

    Ok(DeformationGradient::new(ft.transpose()))
}

/// det F <= 0 时返回 `OrientationReversal`
///
/// 两个上三角、正对角的晶格矩阵得到的 F 行列式恒为正，
/// 该条件只会由外部给定的 F 触发。
pub fn orientation_condition(f: &DeformationGradient) -> Option<Condition> {
    let det = f.volume_ratio();
    if det <= 0.0 {
        Some(Condition::OrientationReversal { det })
    } else {
        None
    }
}
