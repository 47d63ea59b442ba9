//! # 晶格构造
//!
//! 将晶胞参数 (a, b, c, alpha, beta, gamma) 转换为上三角晶格矩阵：
//! a 沿 x 轴，b 位于 xy 平面，c 补全三元组。
//!
//! ## 依赖关系
//! - 被 `mech/row.rs` 使用
//! - 使用 `models/cell.rs`

use crate::error::{MechError, Result};
use crate::models::{LatticeMatrix, UnitCell};

use nalgebra::Matrix3;
use std::f64::consts::PI;

/// 从晶胞参数构造晶格矩阵（列向量为 a, b, c），角度为弧度
pub fn build_lattice(cell: &UnitCell) -> Result<LatticeMatrix> {
    let [a, b, c] = cell.lengths;
    let [alpha, beta, gamma] = cell.angles;

    // NaN 也在这里被拒绝
    if !(a > 0.0 && b > 0.0 && c > 0.0) {
        return Err(MechError::DegenerateCell(format!(
            "lengths must be positive (a = {}, b = {}, c = {})",
            a, b, c
        )));
    }
    for (name, angle) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
        if !(angle > 0.0 && angle < PI) {
            return Err(MechError::DegenerateCell(format!(
                "{} = {} rad is outside (0, pi)",
                name, angle
            )));
        }
    }

    let cos_alpha = alpha.cos();
    let cos_beta = beta.cos();
    let cos_gamma = gamma.cos();
    let sin_gamma = gamma.sin();

    let c1 = c * cos_beta;
    let c2 = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
    let c3_sq = c * c - c1 * c1 - c2 * c2;

    if !(c3_sq > f64::EPSILON * c * c) {
        return Err(MechError::DegenerateCell(format!(
            "angles ({:.4}, {:.4}, {:.4}) deg do not form a parallelepiped",
            alpha.to_degrees(),
            beta.to_degrees(),
            gamma.to_degrees()
        )));
    }

    #[rustfmt::skip]
    let matrix = Matrix3::new(
        a,   b * cos_gamma, c1,
        0.0, b * sin_gamma, c2,
        0.0, 0.0,           c3_sq.sqrt(),
    );

    let lattice = LatticeMatrix::from_matrix(matrix);
    if matrix.iter().any(|x| !x.is_finite()) || !(lattice.volume() > 0.0) {
        return Err(MechError::DegenerateCell(
            "lattice matrix is singular or contains non-finite entries".to_string(),
        ));
    }

    Ok(lattice)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 由晶格向量的点积反算 (a, b, c, alpha, beta, gamma)
    fn recover_parameters(lattice: &LatticeMatrix) -> (f64, f64, f64, f64, f64, f64) {
        let m = &lattice.matrix;
        let (va, vb, vc) = (m.column(0), m.column(1), m.column(2));
        let (a, b, c) = (va.norm(), vb.norm(), vc.norm());

        let alpha = (vb.dot(&vc) / (b * c)).acos();
        let beta = (va.dot(&vc) / (a * c)).acos();
        let gamma = (va.dot(&vb) / (a * b)).acos();
        (a, b, c, alpha, beta, gamma)
    }

    fn assert_round_trip(cell: UnitCell) {
        let lattice = build_lattice(&cell).unwrap();
        let (a, b, c, alpha, beta, gamma) = recover_parameters(&lattice);

        assert!((a - cell.lengths[0]).abs() < 1e-10);
        assert!((b - cell.lengths[1]).abs() < 1e-10);
        assert!((c - cell.lengths[2]).abs() < 1e-10);
        assert!((alpha - cell.angles[0]).abs() < 1e-10);
        assert!((beta - cell.angles[1]).abs() < 1e-10);
        assert!((gamma - cell.angles[2]).abs() < 1e-10);
    }

    #[test]
    fn test_cubic() {
        let lattice =
            build_lattice(&UnitCell::from_degrees(5.0, 5.0, 5.0, 90.0, 90.0, 90.0)).unwrap();
        assert!((lattice.matrix - Matrix3::identity() * 5.0).amax() < 1e-12);
        assert!((lattice.volume() - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_upper_triangular() {
        let lattice =
            build_lattice(&UnitCell::from_degrees(7.1, 5.9, 15.3, 95.2, 101.7, 88.4)).unwrap();
        let m = lattice.matrix;
        assert_eq!(m[(1, 0)], 0.0);
        assert_eq!(m[(2, 0)], 0.0);
        assert_eq!(m[(2, 1)], 0.0);
        assert!(m[(0, 0)] > 0.0 && m[(1, 1)] > 0.0 && m[(2, 2)] > 0.0);
    }

    #[test]
    fn test_round_trip_parameters() {
        assert_round_trip(UnitCell::from_degrees(3.0, 3.0, 5.0, 90.0, 90.0, 120.0));
        assert_round_trip(UnitCell::from_degrees(7.1, 5.9, 15.3, 95.2, 101.7, 88.4));
        assert_round_trip(UnitCell::from_degrees(10.02, 7.84, 6.11, 72.5, 81.3, 66.9));
        assert_round_trip(UnitCell::from_degrees(1.0, 2.0, 3.0, 120.0, 110.0, 100.0));
    }

    #[test]
    fn test_impossible_angles() {
        // alpha + beta < gamma: no parallelepiped exists
        let err = build_lattice(&UnitCell::from_degrees(1.0, 1.0, 1.0, 30.0, 30.0, 120.0))
            .unwrap_err();
        assert_eq!(err.kind(), "degenerate_cell");
    }

    #[test]
    fn test_invalid_inputs() {
        let zero = build_lattice(&UnitCell::from_degrees(0.0, 1.0, 1.0, 90.0, 90.0, 90.0));
        assert!(matches!(zero, Err(MechError::DegenerateCell(_))));

        let nan = build_lattice(&UnitCell::from_degrees(1.0, f64::NAN, 1.0, 90.0, 90.0, 90.0));
        assert!(matches!(nan, Err(MechError::DegenerateCell(_))));

        let flat = build_lattice(&UnitCell::from_degrees(1.0, 1.0, 1.0, 90.0, 90.0, 180.0));
        assert!(matches!(flat, Err(MechError::DegenerateCell(_))));
    }
}
