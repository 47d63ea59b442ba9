//! # 晶胞与晶格矩阵数据模型
//!
//! `UnitCell` 保存一行数据中单个构型（参考态或变形态）的晶胞参数，
//! `LatticeMatrix` 是由其导出的 3x3 晶格矩阵。
//!
//! ## 约定
//! 晶格矩阵以列向量表示 a, b, c，且为上三角：
//! ```text
//! [[a1, b1, c1],
//!  [0,  b2, c2],
//!  [0,  0,  c3]]
//! ```
//!
//! ## 依赖关系
//! - 被 `mech/` 和 `data/` 使用
//! - 使用 `nalgebra`

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// 晶胞参数（长度 + 弧度制夹角）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitCell {
    /// a, b, c
    pub lengths: [f64; 3],
    /// alpha (b,c), beta (a,c), gamma (a,b)，弧度
    pub angles: [f64; 3],
}

impl UnitCell {
    /// 从角度制晶胞参数创建
    pub fn from_degrees(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        UnitCell {
            lengths: [a, b, c],
            angles: [alpha.to_radians(), beta.to_radians(), gamma.to_radians()],
        }
    }
}

/// 晶格矩阵，列向量为 a, b, c
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeMatrix {
    pub matrix: Matrix3<f64>,
}

impl LatticeMatrix {
    pub fn from_matrix(matrix: Matrix3<f64>) -> Self {
        LatticeMatrix { matrix }
    }

    /// 晶胞体积（有符号）
    pub fn volume(&self) -> f64 {
        self.matrix.determinant()
    }

    /// 分数坐标转笛卡尔坐标
    pub fn frac_to_cart(&self, frac: &Vector3<f64>) -> Vector3<f64> {
        self.matrix * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume() {
        let lattice = LatticeMatrix::from_matrix(Matrix3::new(
            4.0, 1.0, 0.5, //
            0.0, 4.0, 0.2, //
            0.0, 0.0, 4.0,
        ));
        assert!((lattice.volume() - 64.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_degrees() {
        let cell = UnitCell::from_degrees(1.0, 2.0, 3.0, 90.0, 180.0, 45.0);
        assert!((cell.angles[0] - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
        assert!((cell.angles[1] - std::f64::consts::PI).abs() < 1e-15);
        assert!((cell.angles[2] - std::f64::consts::FRAC_PI_4).abs() < 1e-15);
    }

    #[test]
    fn test_frac_to_cart() {
        let lattice = LatticeMatrix::from_matrix(Matrix3::new(
            2.0, 1.0, 0.0, //
            0.0, 3.0, 0.0, //
            0.0, 0.0, 4.0,
        ));
        let v = lattice.frac_to_cart(&Vector3::new(0.0, 1.0, 1.0));
        assert!((v - Vector3::new(1.0, 3.0, 4.0)).norm() < 1e-12);
    }
}
