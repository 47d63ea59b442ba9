//! # 孪晶 / 惯习面解
//!
//! 当 lam1 <= 1 = lam2 <= lam3 且 lam1 < lam3 时，方程 Q·F - G = a ⊗ n
//! 恰有两组解 (κ = ±1)：
//!
//! ```text
//! a = ρ ( sqrt(λ3(1-λ1)/(λ3-λ1)) e1 + κ sqrt(λ1(λ3-1)/(λ3-λ1)) e3 )
//! n = (sqrt(λ3) - sqrt(λ1)) / (ρ sqrt(λ3-λ1)) ( -sqrt(1-λ1) Gᵗe1 + κ sqrt(λ3-1) Gᵗe3 )
//! ```
//!
//! ρ 取使 |n| = 1 的值。返回顺序为 [κ = +1, κ = -1]。
//!
//! ## 依赖关系
//! - 被 `mech/row.rs` 使用
//! - 使用 `mech/compat.rs` 的结果

use crate::models::{CompatibilityResult, DeformationGradient, Tolerance, TwinSolution};

use nalgebra::Vector3;

/// 求解孪晶方程的两组解；不相容或平凡变换时返回 `None`
pub fn twin_solutions(
    g: &DeformationGradient,
    compat: &CompatibilityResult,
    tol: Tolerance,
) -> Option<[TwinSolution; 2]> {
    if compat.is_trivial() || !compat.is_compatible() {
        return None;
    }

    // 容差内允许 lam1 略大于 1 或 lam3 略小于 1
    let l1 = compat.lambdas[0].min(1.0);
    let l3 = compat.lambdas[2].max(1.0);
    let spread = l3 - l1;
    if spread <= tol.value() {
        return None;
    }

    let gt = g.matrix.transpose();
    let e1 = compat.eigenvector(0);
    let e3 = compat.eigenvector(2);
    let coef = (l3.sqrt() - l1.sqrt()) / spread.sqrt();

    let solve = |kappa: f64| -> Option<TwinSolution> {
        let n_dir: Vector3<f64> =
            gt * e1 * -(1.0 - l1).sqrt() + gt * e3 * (kappa * (l3 - 1.0).sqrt());
        let n_norm = n_dir.norm();
        let rho = coef * n_norm;
        if !(rho > f64::EPSILON) {
            return None;
        }

        let normal = n_dir / n_norm;
        let shear = (e1 * (l3 * (1.0 - l1) / spread).sqrt()
            + e3 * (kappa * (l1 * (l3 - 1.0) / spread).sqrt()))
            * rho;

        Some(TwinSolution { shear, normal })
    };

    Some([solve(1.0)?, solve(-1.0)?])
}

/// 方向向量与两组法向之间的最小锐角（度）
pub fn min_normal_angle(direction: &Vector3<f64>, twins: &[TwinSolution; 2]) -> Option<f64> {
    let norm = direction.norm();
    if !(norm > 0.0) {
        return None;
    }

    twins
        .iter()
        .map(|t| {
            let cos = (direction.dot(&t.normal) / norm).abs().min(1.0);
            cos.acos().to_degrees()
        })
        .fold(None, |acc: Option<f64>, angle| {
            Some(acc.map_or(angle, |a| a.min(angle)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mech::check_compatibility;
    use nalgebra::{Matrix3, Rotation3};

    fn rank_one(a: Vector3<f64>, n: Vector3<f64>) -> DeformationGradient {
        DeformationGradient::new(Matrix3::identity() + a * n.transpose())
    }

    fn assert_solves(f: &DeformationGradient, g: &DeformationGradient, twin: &TwinSolution) {
        // (G + a⊗n)ᵗ(G + a⊗n) = FᵗF 等价于存在转动 Q 使 QF = G + a⊗n
        let h = g.matrix + twin.shear * twin.normal.transpose();
        let lhs = h.transpose() * h;
        let rhs = f.matrix.transpose() * f.matrix;
        assert!((lhs - rhs).amax() < 1e-9);

        let q = h * f.matrix.try_inverse().unwrap();
        assert!((q.transpose() * q - Matrix3::identity()).amax() < 1e-9);
        assert!((twin.normal.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_solutions_against_austenite() {
        let f = rank_one(Vector3::new(0.1, 0.0, 0.2), Vector3::new(0.0, 0.0, 1.0));
        let g = DeformationGradient::identity();
        let compat = check_compatibility(&f, &g, Tolerance::default()).unwrap();

        let twins = twin_solutions(&g, &compat, Tolerance::default()).unwrap();
        assert_ne!(twins[0].normal, twins[1].normal);
        for twin in &twins {
            assert_solves(&f, &g, twin);
        }

        // 构造时使用的法向必定是其中一组解
        let z = Vector3::new(0.0, 0.0, 1.0);
        assert!(twins.iter().any(|t| (t.normal.dot(&z).abs() - 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_solutions_between_variants() {
        let rot = Rotation3::from_axis_angle(&Vector3::y_axis(), 0.3).into_inner();
        let g = DeformationGradient::new(Matrix3::from_diagonal(&Vector3::new(1.1, 0.95, 1.02)));
        let jump = Matrix3::identity()
            + Vector3::new(0.05, -0.02, 0.1) * Vector3::new(0.6, 0.0, 0.8).transpose();
        let f = DeformationGradient::new(rot * jump * g.matrix);

        let compat = check_compatibility(&f, &g, Tolerance::default()).unwrap();
        assert!(compat.is_compatible());

        let twins = twin_solutions(&g, &compat, Tolerance::default()).unwrap();
        for twin in &twins {
            assert_solves(&f, &g, twin);
        }
    }

    #[test]
    fn test_no_solutions_when_incompatible() {
        let f = DeformationGradient::new(Matrix3::from_diagonal(&Vector3::new(1.1, 1.05, 1.0)));
        let g = DeformationGradient::identity();
        let compat = check_compatibility(&f, &g, Tolerance::default()).unwrap();
        assert!(twin_solutions(&g, &compat, Tolerance::default()).is_none());
    }

    #[test]
    fn test_no_solutions_when_trivial() {
        let g = DeformationGradient::identity();
        let compat = check_compatibility(&g, &g, Tolerance::default()).unwrap();
        assert!(twin_solutions(&g, &compat, Tolerance::default()).is_none());
    }

    #[test]
    fn test_min_normal_angle() {
        let twin = |normal: Vector3<f64>| TwinSolution {
            shear: Vector3::zeros(),
            normal,
        };
        let twins = [
            twin(Vector3::new(0.0, 0.0, 1.0)),
            twin(Vector3::new(1.0, 0.0, 0.0)),
        ];

        let angle = min_normal_angle(&Vector3::new(0.0, 0.0, -2.0), &twins).unwrap();
        assert!(angle.abs() < 1e-9);

        let angle = min_normal_angle(&Vector3::new(1.0, 0.0, 1.0), &twins).unwrap();
        assert!((angle - 45.0).abs() < 1e-9);

        assert!(min_normal_angle(&Vector3::zeros(), &twins).is_none());
    }
}
