//! # 微观力学计算核心
//!
//! 晶胞参数 → 晶格矩阵 → 变形梯度 → 极分解 / 相容性检查。
//! 所有函数均为纯函数，不做任何 I/O。
//!
//! ## 子模块
//! - `lattice`: 晶格构造
//! - `deform`: 变形梯度
//! - `polar`: 极分解
//! - `compat`: 运动学相容性
//! - `twin`: 孪晶 / 惯习面解
//! - `row`: 单行计算流水线
//!
//! ## 依赖关系
//! - 被 `commands/calc.rs` 使用
//! - 使用 `models/`, `data/`

pub mod compat;
pub mod deform;
pub mod lattice;
pub mod polar;
pub mod row;
pub mod twin;

pub use compat::check_compatibility;
pub use deform::{deformation_gradient, orientation_condition};
pub use lattice::build_lattice;
pub use polar::polar_decompose;
pub use row::{evaluate, RowOptions};
pub use twin::{min_normal_angle, twin_solutions};
