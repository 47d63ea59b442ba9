//! # 统一错误处理模块
//!
//! 定义 mcmech 的所有硬错误类型，使用 `thiserror` 派生。
//!
//! 可报告条件（相容性违背、平凡变换等）不是错误，见 `models/condition.rs`。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// mcmech 统一错误类型
#[derive(Error, Debug)]
pub enum MechError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 数据表错误
    // ─────────────────────────────────────────────────────────────
    #[error("Column '{column}' is not a header in '{path}'")]
    MissingColumn { column: String, path: String },

    #[error("Invalid value '{value}' in column '{column}'")]
    InvalidValue { column: String, value: String },

    #[error("Unrecognized unit in '{input}'")]
    UnitParse { input: String },

    #[error("Invalid Miller indices: '{0}'")]
    InvalidMiller(String),

    // ─────────────────────────────────────────────────────────────
    // 几何 / 力学错误
    // ─────────────────────────────────────────────────────────────
    #[error("Degenerate unit cell: {0}")]
    DegenerateCell(String),

    #[error("Singular lattice matrix (det = {det:.3e})")]
    SingularLattice { det: f64 },

    #[error("Singular stretch tensor (smallest principal stretch = {stretch:.3e})")]
    SingularStretch { stretch: f64 },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl MechError {
    /// 错误类别的稳定短名，用于标记失败的数据行
    pub fn kind(&self) -> &'static str {
        match self {
            MechError::FileWriteError { .. } => "file_write",
            MechError::FileNotFound { .. } => "file_not_found",
            MechError::MissingColumn { .. } => "missing_column",
            MechError::InvalidValue { .. } => "invalid_value",
            MechError::UnitParse { .. } => "unit_parse",
            MechError::InvalidMiller(_) => "invalid_miller",
            MechError::DegenerateCell(_) => "degenerate_cell",
            MechError::SingularLattice { .. } => "singular_lattice",
            MechError::SingularStretch { .. } => "singular_stretch",
            MechError::InvalidArgument(_) => "invalid_argument",
            MechError::CsvError(_) => "csv",
            MechError::Other(_) => "other",
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, MechError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_stable() {
        assert_eq!(
            MechError::SingularLattice { det: 0.0 }.kind(),
            "singular_lattice"
        );
        assert_eq!(
            MechError::UnitParse {
                input: "3ft".to_string()
            }
            .kind(),
            "unit_parse"
        );
    }

    #[test]
    fn test_display_includes_context() {
        let err = MechError::MissingColumn {
            column: "miller".to_string(),
            path: "mc_data.csv".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("miller"));
        assert!(msg.contains("mc_data.csv"));
    }
}
