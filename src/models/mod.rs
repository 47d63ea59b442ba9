//! # 数据模型模块
//!
//! 定义晶胞、晶格矩阵、力学张量、可报告条件与逐行结果记录。
//!
//! ## 依赖关系
//! - 被 `data/`, `mech/` 和 `commands/` 使用
//! - 子模块: cell, condition, record, tensor

pub mod cell;
pub mod condition;
pub mod record;
pub mod tensor;

pub use cell::{LatticeMatrix, UnitCell};
pub use condition::{Condition, Tolerance};
pub use record::{RowFailure, RowRecord};
pub use tensor::{CompatibilityResult, DeformationGradient, StretchRotation, TwinSolution};
