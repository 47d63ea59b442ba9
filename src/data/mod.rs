//! # 数据访问层
//!
//! 行过滤的数据表读取、尺寸字符串与 Miller 指数解析。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `mech/row.rs` 使用
//! - 子模块: dataset, miller, units

pub mod dataset;
pub mod miller;
pub mod units;

pub use dataset::{load_rows, CellRow};
