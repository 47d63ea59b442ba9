//! # dims 命令实现
//!
//! 将样品尺寸字符串换算为米并以表格打印。
//!
//! ## 依赖关系
//! - 使用 `cli/dims.rs` 定义的参数
//! - 使用 `data/units.rs`

use crate::cli::dims::DimsArgs;
use crate::data::units;
use crate::error::{MechError, Result};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 尺寸换算结果行
#[derive(Debug, Clone, Tabled)]
struct DimsRow {
    #[tabled(rename = "Input")]
    input: String,
    #[tabled(rename = "x (m)")]
    x: String,
    #[tabled(rename = "y (m)")]
    y: String,
    #[tabled(rename = "z (m)")]
    z: String,
}

/// 执行 dims 命令
pub fn execute(args: DimsArgs) -> Result<()> {
    let results = units::parse_dimension_column(&args.values);

    let mut rows = Vec::new();
    let mut failed = 0;
    for (input, result) in args.values.iter().zip(results) {
        match result {
            Ok([x, y, z]) => rows.push(DimsRow {
                input: input.clone(),
                x: format!("{:e}", x),
                y: format!("{:e}", y),
                z: format!("{:e}", z),
            }),
            Err(e) => {
                failed += 1;
                output::print_error(&e.to_string());
            }
        }
    }

    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }

    if failed > 0 {
        return Err(MechError::InvalidArgument(format!(
            "{} of {} dimension strings could not be parsed",
            failed,
            args.values.len()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_valid() {
        let args = DimsArgs {
            values: vec!["2mmx500umx1cm".to_string(), "1x1x1".to_string()],
        };
        assert!(execute(args).is_ok());
    }

    #[test]
    fn test_reports_failures() {
        let args = DimsArgs {
            values: vec!["2mmx500umx1cm".to_string(), "2ftx1x1".to_string()],
        };
        let err = execute(args).unwrap_err();
        assert!(err.to_string().contains("1 of 2"));
    }
}
