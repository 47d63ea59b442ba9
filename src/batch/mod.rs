//! # 批量处理模块
//!
//! 提供逐行并行计算能力。
//!
//! ## 功能
//! - 并行处理（每行独立，无共享可变状态）
//! - 进度反馈与统计
//! - 失败行与成功行分流
//!
//! ## 依赖关系
//! - 被 `commands/calc.rs` 使用
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod runner;

pub use runner::{BatchResult, BatchRunner};
