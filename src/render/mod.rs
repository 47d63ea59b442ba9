//! # 表格渲染模块
//!
//! 将逐行结果格式化为 LaTeX (tabularray) 表格。
//!
//! ## 依赖关系
//! - 被 `commands/table.rs` 使用
//! - 子模块: latex

pub mod latex;

pub use latex::{
    format_entry, matrix_to_latex, multirow, render_table, unique_hline,
    TableOptions,
};

pub(crate) use latex::escape_text;
