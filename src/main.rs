//! # mcmech - 分子晶体相变微观力学工具
//!
//! 从参考态 / 变形态晶胞参数表逐行计算连续介质力学量，
//! 并将结果整理为 LaTeX 表格。
//!
//! ## 子命令
//! - `calc`  - 变形梯度、极分解、运动学相容性、孪晶解
//! - `table` - 结果 CSV 转 tabularray 表格
//! - `dims`  - 样品尺寸字符串换算
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── data/     (数据表读取、单位解析)
//!   │     ├── mech/     (微观力学计算核心)
//!   │     ├── batch/    (逐行并行执行)
//!   │     └── render/   (LaTeX 表格)
//!   ├── models/     (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod data;
mod error;
mod mech;
mod models;
mod render;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
