//! # table 子命令 CLI 定义
//!
//! 将结果 CSV 的指定列渲染为 LaTeX 表格。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/table.rs`

use clap::Args;
use std::path::PathBuf;

/// table 子命令参数
#[derive(Args, Debug)]
pub struct TableArgs {
    /// Results CSV (e.g. the output of `calc`)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Columns to include; a matrix prefix such as `f`, `u` or `q` expands to a bmatrix
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub columns: Vec<String>,

    /// Merge consecutive repeated values in these columns (first one draws the main rules)
    #[arg(long, value_delimiter = ',')]
    pub group_by: Vec<String>,

    /// Output .tex file
    #[arg(short, long, default_value = "table.tex")]
    pub output: PathBuf,

    /// Optional table caption (wraps the tblr in a table float)
    #[arg(long)]
    pub caption: Option<String>,

    /// Skip the terminal preview
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}
