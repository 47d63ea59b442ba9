//! # dims 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/dims.rs`

use clap::Args;

/// dims 子命令参数
#[derive(Args, Debug)]
pub struct DimsArgs {
    /// Dimension strings such as "1.5mmx200umx3cm" (suffixes: nm, um, mm, cm; none = m)
    #[arg(required = true)]
    pub values: Vec<String>,
}
