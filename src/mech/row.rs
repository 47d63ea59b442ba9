//! # 单行计算流水线
//!
//! CellRow → 晶格矩阵 → F → (U, Q) + 相容性 + 孪晶解 → RowRecord。
//! 每行只读取自身输入并写入自身结果，行与行之间没有共享状态。
//!
//! ## 依赖关系
//! - 被 `commands/calc.rs` 通过 `batch/runner.rs` 并行调用
//! - 使用 `data/dataset.rs`, `data/miller.rs`

use crate::data::{miller, CellRow};
use crate::error::{MechError, Result};
use crate::models::{Condition, DeformationGradient, RowRecord, Tolerance};

use super::{
    build_lattice, check_compatibility, deformation_gradient, min_normal_angle,
    orientation_condition, polar_decompose, twin_solutions,
};

/// 单行计算选项
#[derive(Debug, Clone, Default)]
pub struct RowOptions {
    pub tol: Tolerance,
    /// 含 Miller 指数的附加列名
    pub miller_column: Option<String>,
}

/// 计算单行的全部力学量（相对奥氏体 G = I）
pub fn evaluate(row: &CellRow, options: &RowOptions) -> Result<RowRecord> {
    let tol = options.tol;

    let reference = build_lattice(&row.reference)?;
    let deformed = build_lattice(&row.deformed)?;
    let f = deformation_gradient(&reference, &deformed)?;

    let volume_ratio = f.volume_ratio();
    let mut conditions: Vec<Condition> = orientation_condition(&f).into_iter().collect();

    let polar = polar_decompose(&f, tol)?;
    conditions.extend(polar.conditions.iter().cloned());

    let austenite = DeformationGradient::identity();
    let compat = check_compatibility(&f, &austenite, tol)?;
    conditions.extend(compat.conditions.iter().cloned());

    let twins = twin_solutions(&austenite, &compat, tol);

    let theta = match &options.miller_column {
        Some(column) => {
            let raw = row.extra(column).ok_or_else(|| MechError::InvalidValue {
                column: column.clone(),
                value: String::new(),
            })?;
            let frac = miller::parse_miller(raw)?;
            let direction = reference.frac_to_cart(&frac);
            twins
                .as_ref()
                .and_then(|t| min_normal_angle(&direction, t))
        }
        None => None,
    };

    Ok(RowRecord {
        line: row.line,
        extras: row.extras.clone(),
        deformation: f.matrix,
        volume_ratio,
        stretch: polar.stretch,
        rotation: polar.rotation,
        principal_stretches: polar.principal_stretches,
        lambdas: compat.lambdas,
        eigenvectors: compat.eigenvectors,
        twins,
        theta,
        conditions,
    })
}
