//! # 运动学相容性检查
//!
//! 对两个变形梯度 F、G（两个马氏体变体，或变体与奥氏体 G = I）：
//! C = G⁻ᵗ Fᵗ F G⁻¹，特征值升序排列后检查
//! lam1 <= 1, lam2 = 1, lam3 >= 1（均在容差内）。
//!
//! 不满足相容性只是数据质量信号：结果照常返回，附带条件标记。
//!
//! ## 依赖关系
//! - 被 `mech/row.rs`, `mech/twin.rs` 使用
//! - 使用 `nalgebra::SymmetricEigen`

use crate::error::Result;
use crate::models::{CompatibilityResult, Condition, DeformationGradient, Tolerance};

use super::deform::invert;
use super::polar::symmetrize;
use nalgebra::{Matrix3, SymmetricEigen};
use std::cmp::Ordering;

/// 相对 Cauchy-Green 张量 C = G⁻ᵗ Fᵗ F G⁻¹
pub fn relative_cauchy_green(
    f: &DeformationGradient,
    g: &DeformationGradient,
) -> Result<Matrix3<f64>> {
    let g_inv = invert(&g.matrix)?;
    let c = g_inv.transpose() * f.matrix.transpose() * f.matrix * g_inv;
    Ok(symmetrize(c))
}

/// 检查 F 与 G 之间的运动学相容性
pub fn check_compatibility(
    f: &DeformationGradient,
    g: &DeformationGradient,
    tol: Tolerance,
) -> Result<CompatibilityResult> {
    let c = relative_cauchy_green(f, g)?;

    let mut conditions = Vec::new();
    if (c - Matrix3::identity()).amax() <= tol.value() {
        conditions.push(Condition::TrivialTransformation);
    }

    // 升序排列特征值，特征向量随同一置换移动
    let eigen = SymmetricEigen::new(c);
    let mut order = [0usize, 1, 2];
    order.sort_by(|&i, &j| {
        eigen.eigenvalues[i]
            .partial_cmp(&eigen.eigenvalues[j])
            .unwrap_or(Ordering::Equal)
    });

    let mut lambdas = [0.0; 3];
    let mut eigenvectors = Matrix3::zeros();
    for (k, &idx) in order.iter().enumerate() {
        lambdas[k] = eigen.eigenvalues[idx];
        eigenvectors.set_column(k, &eigen.eigenvectors.column(idx));
    }

    let compatible =
        tol.le(lambdas[0], 1.0) && tol.eq(lambdas[1], 1.0) && tol.ge(lambdas[2], 1.0);
    if !compatible {
        conditions.push(Condition::CompatibilityViolation { lambdas });
    }

    Ok(CompatibilityResult {
        lambdas,
        eigenvectors,
        conditions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MechError;
    use nalgebra::{Rotation3, Vector3};

    fn austenite() -> DeformationGradient {
        DeformationGradient::identity()
    }

    #[test]
    fn test_self_compatibility_is_trivial() {
        #[rustfmt::skip]
        let f = DeformationGradient::new(Matrix3::new(
            1.05, 0.12, -0.03,
            0.00, 0.97,  0.08,
            0.02, 0.00,  1.10,
        ));
        let result = check_compatibility(&f, &f, Tolerance::default()).unwrap();
        let c = relative_cauchy_green(&f, &f).unwrap();

        assert!((c - Matrix3::identity()).amax() < 1e-10);
        assert!(result.is_trivial());
        assert!(result.is_compatible());
        for lam in result.lambdas {
            assert!((lam - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_eigenvalues_sorted_ascending() {
        let rot = Rotation3::from_axis_angle(&Vector3::x_axis(), 0.7).into_inner();
        let diagonals = [
            Vector3::new(1.3, 0.9, 1.0),
            Vector3::new(1.0, 1.2, 0.8),
            Vector3::new(0.7, 0.95, 1.4),
        ];
        for d in diagonals {
            let f = DeformationGradient::new(rot * Matrix3::from_diagonal(&d));
            let result = check_compatibility(&f, &austenite(), Tolerance::default()).unwrap();
            let c = relative_cauchy_green(&f, &austenite()).unwrap();
            assert!(result.lambdas[0] <= result.lambdas[1]);
            assert!(result.lambdas[1] <= result.lambdas[2]);

            // 特征向量与特征值一一对应
            for k in 0..3 {
                let e = result.eigenvector(k);
                let residual = c * e - e * result.lambdas[k];
                assert!(residual.norm() < 1e-10);
                assert!((e.norm() - 1.0).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_compatible_rank_one_connection() {
        // F = I + a ⊗ n 必然满足 lam2 = 1
        let a = Vector3::new(0.1, 0.0, 0.2);
        let n = Vector3::new(0.0, 0.0, 1.0);
        let f = DeformationGradient::new(Matrix3::identity() + a * n.transpose());
        let result = check_compatibility(&f, &austenite(), Tolerance::default()).unwrap();

        assert!(result.is_compatible());
        assert!(!result.is_trivial());
        assert!(result.lambdas[0] < 1.0);
        assert!((result.lambdas[1] - 1.0).abs() < 1e-10);
        assert!(result.lambdas[2] > 1.0);
    }

    #[test]
    fn test_violation_is_reported_not_fatal() {
        let f = DeformationGradient::new(Matrix3::from_diagonal(&Vector3::new(1.1, 1.05, 1.0)));
        let result = check_compatibility(&f, &austenite(), Tolerance::default()).unwrap();

        assert!(!result.is_compatible());
        assert!(matches!(
            result.conditions.as_slice(),
            [Condition::CompatibilityViolation { .. }]
        ));
        assert!((result.lambdas[0] - 1.0).abs() < 1e-10);
        assert!((result.lambdas[1] - 1.05 * 1.05).abs() < 1e-10);
        assert!((result.lambdas[2] - 1.21).abs() < 1e-10);
    }

    #[test]
    fn test_relative_to_second_variant() {
        let g = DeformationGradient::new(Matrix3::from_diagonal(&Vector3::new(1.2, 1.0, 0.9)));
        let f = DeformationGradient::new(Matrix3::from_diagonal(&Vector3::new(1.2, 1.1, 0.9)));
        let result = check_compatibility(&f, &g, Tolerance::default()).unwrap();

        // 只有第二轴存在相对伸长
        assert!((result.lambdas[0] - 1.0).abs() < 1e-10);
        assert!((result.lambdas[1] - 1.0).abs() < 1e-10);
        assert!((result.lambdas[2] - 1.21).abs() < 1e-10);
        assert!(result.is_compatible());
    }

    #[test]
    fn test_singular_g() {
        let g = DeformationGradient::new(Matrix3::zeros());
        let err = check_compatibility(&austenite(), &g, Tolerance::default()).unwrap_err();
        assert!(matches!(err, MechError::SingularLattice { .. }));
    }
}
