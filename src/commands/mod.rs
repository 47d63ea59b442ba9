//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `data/`, `mech/`, `render/`, `utils/`
//! - 子模块: calc, dims, table

pub mod calc;
pub mod dims;
pub mod table;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Calc(args) => calc::execute(args),
        Commands::Table(args) => table::execute(args),
        Commands::Dims(args) => dims::execute(args),
    }
}
