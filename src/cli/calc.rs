//! # calc 子命令 CLI 定义
//!
//! 从晶胞数据表逐行计算变形梯度、伸缩/转动分解与运动学相容性。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/calc.rs`

use clap::Args;
use std::path::PathBuf;

/// calc 子命令参数
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Input CSV with reference/deformed unit cell columns (angles in degrees)
    #[arg(long, env = "MCMECH_DATA", default_value = "data/mc_data.csv")]
    pub data: PathBuf,

    /// Output CSV for per-row results (failed rows go to <stem>.failed.csv)
    #[arg(short, long, default_value = "data/mc_calc.csv")]
    pub output: PathBuf,

    /// Additional columns to carry through (rows missing any of them are excluded)
    #[arg(long, value_delimiter = ',')]
    pub extra: Vec<String>,

    /// Column holding Miller indices; reports the angle to the habit-plane normal
    #[arg(long)]
    pub miller: Option<String>,

    /// Absolute tolerance for eigenvalue and identity comparisons
    #[arg(long, env = "MCMECH_TOL", default_value_t = 1e-6)]
    pub tol: f64,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Number of rows to show in the terminal summary
    #[arg(long, default_value_t = 10)]
    pub top_n: usize,
}

impl CalcArgs {
    /// 所有必需的附加列（`--extra` 加上 `--miller`，去重）
    pub fn required_extras(&self) -> Vec<String> {
        let mut columns = self.extra.clone();
        if let Some(miller) = &self.miller {
            if !columns.contains(miller) {
                columns.push(miller.clone());
            }
        }
        columns
    }
}
