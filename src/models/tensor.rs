//! # 连续介质力学张量数据模型
//!
//! 变形梯度、伸缩/转动分解、相容性结果与孪晶解。
//! 所有实体都按数据行新建，计算完成后不再修改。
//!
//! ## 依赖关系
//! - 由 `mech/` 构造
//! - 被 `models/record.rs` 展平输出

use super::condition::Condition;
use nalgebra::{Matrix3, Vector3};

/// 变形梯度 F（一般非对称）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeformationGradient {
    pub matrix: Matrix3<f64>,
}

impl DeformationGradient {
    pub fn new(matrix: Matrix3<f64>) -> Self {
        DeformationGradient { matrix }
    }

    pub fn identity() -> Self {
        DeformationGradient {
            matrix: Matrix3::identity(),
        }
    }

    /// 体积比 det F
    pub fn volume_ratio(&self) -> f64 {
        self.matrix.determinant()
    }
}

/// 极分解结果 F = Q·U
#[derive(Debug, Clone, PartialEq)]
pub struct StretchRotation {
    /// 右伸缩张量 U（对称正定）
    pub stretch: Matrix3<f64>,
    /// 转动 Q（正交）
    pub rotation: Matrix3<f64>,
    /// U 的特征值（主伸缩），升序
    pub principal_stretches: [f64; 3],
    pub conditions: Vec<Condition>,
}

/// 相容性检查结果
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityResult {
    /// 升序特征值 lam1 <= lam2 <= lam3
    pub lambdas: [f64; 3],
    /// 列向量为对应的单位特征向量
    pub eigenvectors: Matrix3<f64>,
    pub conditions: Vec<Condition>,
}

impl CompatibilityResult {
    /// 第 i 个特征向量
    pub fn eigenvector(&self, i: usize) -> Vector3<f64> {
        self.eigenvectors.column(i).into_owned()
    }

    /// 是否满足 lam1 <= 1, lam2 = 1, lam3 >= 1
    pub fn is_compatible(&self) -> bool {
        !self
            .conditions
            .iter()
            .any(|c| matches!(c, Condition::CompatibilityViolation { .. }))
    }

    pub fn is_trivial(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| matches!(c, Condition::TrivialTransformation))
    }
}

/// 孪晶方程 Q·F - G = a ⊗ n 的一个解，Q = (G + a ⊗ n) F⁻¹
#[derive(Debug, Clone, PartialEq)]
pub struct TwinSolution {
    /// 剪切向量 a
    pub shear: Vector3<f64>,
    /// 界面（惯习面）单位法向 n
    pub normal: Vector3<f64>,
}
