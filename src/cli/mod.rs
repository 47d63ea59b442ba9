//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `calc`: 逐行微观力学计算（变形梯度、极分解、相容性）
//! - `table`: 结果 CSV 转 LaTeX 表格
//! - `dims`: 样品尺寸字符串换算为米
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: calc, dims, table

pub mod calc;
pub mod dims;
pub mod table;

use clap::{Parser, Subcommand};

/// mcmech - 分子晶体相变微观力学工具
#[derive(Parser)]
#[command(name = "mcmech")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Micromechanics of molecular crystal phase transformations", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Compute deformation gradient, stretch/rotation and compatibility for every row
    Calc(calc::CalcArgs),

    /// Render columns of a results CSV as a LaTeX (tabularray) table
    Table(table::TableArgs),

    /// Convert sample dimension strings (e.g. "2mmx500umx1cm") to meters
    Dims(dims::DimsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_defaults() {
        let cli = Cli::try_parse_from(["mcmech", "calc"]).unwrap();
        match cli.command {
            Commands::Calc(args) => {
                assert_eq!(args.jobs, 0);
                assert!(args.extra.is_empty());
                assert!(args.miller.is_none());
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn test_calc_extra_columns() {
        let cli = Cli::try_parse_from([
            "mcmech", "calc", "--extra", "name,doi", "--miller", "miller", "--tol", "1e-4",
        ])
        .unwrap();
        match cli.command {
            Commands::Calc(args) => {
                assert_eq!(args.extra, vec!["name", "doi"]);
                assert_eq!(args.miller.as_deref(), Some("miller"));
                assert_eq!(args.tol, 1e-4);
                assert_eq!(args.required_extras(), vec!["name", "doi", "miller"]);
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn test_table_and_dims() {
        let cli = Cli::try_parse_from([
            "mcmech", "table", "--input", "results.csv", "--columns", "name,f,lam2", "--group-by",
            "name",
        ])
        .unwrap();
        match cli.command {
            Commands::Table(args) => {
                assert_eq!(args.input, std::path::PathBuf::from("results.csv"));
                assert_eq!(args.columns, vec!["name", "f", "lam2"]);
                assert_eq!(args.group_by, vec!["name"]);
            }
            _ => panic!("expected table"),
        }

        // 输入文件必须通过 --input 给出
        assert!(Cli::try_parse_from(["mcmech", "table", "results.csv", "-c", "name"]).is_err());

        let cli = Cli::try_parse_from(["mcmech", "dims", "2mmx500umx1cm", "1x1x1"]).unwrap();
        match cli.command {
            Commands::Dims(args) => assert_eq!(args.values.len(), 2),
            _ => panic!("expected dims"),
        }
    }
}
