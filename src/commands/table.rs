//! # table 命令实现
//!
//! 将结果 CSV 的指定列渲染为 tabularray 表格。
//!
//! ## 功能
//! - 普通列：数值按 `format_entry` 规则格式化
//! - 矩阵列：`f` / `u` / `q` 等前缀自动收集 `f11..f33` 组成 bmatrix
//! - `--group-by`：合并连续重复值并生成分组横线
//! - 终端预览（tabled）
//!
//! ## 依赖关系
//! - 使用 `cli/table.rs` 定义的参数
//! - 使用 `render/latex.rs`
//! - 使用 `utils/output.rs`

use crate::cli::table::TableArgs;
use crate::error::{MechError, Result};
use crate::render::{self, TableOptions};
use crate::utils::output;

use csv::StringRecord;
use std::fs;
use tabled::builder::Builder;

/// 预览最多显示的行数
const PREVIEW_ROWS: usize = 15;

/// 已解析的列选择
#[derive(Debug, Clone, PartialEq)]
enum ColumnSelector {
    /// 单列
    Raw { header: String, index: usize },
    /// 以 `{prefix}{i}{j}` 命名的九列组成的矩阵
    Matrix { label: String, indices: [usize; 9] },
}

impl ColumnSelector {
    fn resolve(headers: &StringRecord, name: &str, source: &str) -> Result<Self> {
        if let Some(index) = headers.iter().position(|h| h == name) {
            return Ok(ColumnSelector::Raw {
                header: name.to_string(),
                index,
            });
        }

        let mut indices = [0usize; 9];
        let mut complete = true;
        for (k, slot) in indices.iter_mut().enumerate() {
            let column = format!("{}{}{}", name, k / 3 + 1, k % 3 + 1);
            match headers.iter().position(|h| h == column) {
                Some(i) => *slot = i,
                None => complete = false,
            }
        }

        if complete {
            Ok(ColumnSelector::Matrix {
                label: name.to_uppercase(),
                indices,
            })
        } else {
            Err(MechError::MissingColumn {
                column: name.to_string(),
                path: source.to_string(),
            })
        }
    }

    fn header(&self) -> &str {
        match self {
            ColumnSelector::Raw { header, .. } => header,
            ColumnSelector::Matrix { label, .. } => label,
        }
    }

    fn matrix_values(record: &StringRecord, indices: &[usize; 9]) -> Option<Vec<[f64; 3]>> {
        let mut rows = vec![[0.0; 3]; 3];
        for (k, &idx) in indices.iter().enumerate() {
            rows[k / 3][k % 3] = record.get(idx)?.trim().parse().ok()?;
        }
        Some(rows)
    }

    /// LaTeX 单元格
    fn render(&self, record: &StringRecord) -> String {
        match self {
            ColumnSelector::Raw { index, .. } => {
                let value = record.get(*index).unwrap_or("").trim();
                format_cell(value)
            }
            ColumnSelector::Matrix { indices, .. } => Self::matrix_values(record, indices)
                .map(|rows| render::matrix_to_latex(&rows))
                .unwrap_or_default(),
        }
    }

    /// 终端预览单元格
    fn preview(&self, record: &StringRecord) -> String {
        match self {
            ColumnSelector::Raw { index, .. } => record.get(*index).unwrap_or("").to_string(),
            ColumnSelector::Matrix { indices, .. } => Self::matrix_values(record, indices)
                .map(|rows| {
                    let body = rows
                        .iter()
                        .map(|r| format!("{:.3} {:.3} {:.3}", r[0], r[1], r[2]))
                        .collect::<Vec<_>>()
                        .join("; ");
                    format!("[{}]", body)
                })
                .unwrap_or_default(),
        }
    }
}

/// 普通单元格：整数原样保留，浮点数统一格式化，文本转义
fn format_cell(value: &str) -> String {
    if value.parse::<i64>().is_ok() {
        return value.to_string();
    }
    match value.parse::<f64>() {
        Ok(x) if x.is_finite() => {
            let formatted = render::format_entry(x);
            if formatted.contains('^') {
                format!("\\( {} \\)", formatted)
            } else {
                formatted
            }
        }
        _ => render::escape_text(value),
    }
}

/// 执行 table 命令
pub fn execute(args: TableArgs) -> Result<()> {
    output::print_header("LaTeX Table Generation");

    if !args.input.exists() {
        return Err(MechError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }
    let source = args.input.display().to_string();

    let mut rdr = csv::Reader::from_path(&args.input).map_err(MechError::CsvError)?;
    let headers = rdr.headers().map_err(MechError::CsvError)?.clone();
    let records: Vec<StringRecord> = rdr
        .records()
        .collect::<std::result::Result<_, _>>()
        .map_err(MechError::CsvError)?;

    let selectors: Vec<ColumnSelector> = args
        .columns
        .iter()
        .map(|c| ColumnSelector::resolve(&headers, c, &source))
        .collect::<Result<_>>()?;

    output::print_info(&format!(
        "{} rows, {} columns from '{}'",
        records.len(),
        selectors.len(),
        source
    ));

    let mut cells: Vec<Vec<String>> = records
        .iter()
        .map(|r| selectors.iter().map(|s| s.render(r)).collect())
        .collect();

    let hlines = apply_grouping(&mut cells, &args.columns, &args.group_by)?;

    let table_headers: Vec<String> = selectors.iter().map(|s| s.header().to_string()).collect();
    let options = TableOptions {
        hlines,
        caption: args.caption.clone(),
    };
    let latex = render::render_table(&table_headers, &cells, &options);

    fs::write(&args.output, latex).map_err(|e| MechError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    if !args.quiet {
        let mut builder = Builder::default();
        builder.push_record(table_headers.clone());
        for record in records.iter().take(PREVIEW_ROWS) {
            builder.push_record(selectors.iter().map(|s| s.preview(record)));
        }
        println!("{}", builder.build());
        if records.len() > PREVIEW_ROWS {
            output::print_info(&format!("... {} more rows", records.len() - PREVIEW_ROWS));
        }
    }

    output::print_done(&format!("Table written to '{}'", args.output.display()));
    Ok(())
}

/// 依次对分组列做合并，第一列的横线为主线，其余列只补充主线之外的位置
fn apply_grouping(
    cells: &mut [Vec<String>],
    columns: &[String],
    group_by: &[String],
) -> Result<Vec<String>> {
    let mut hlines = Vec::new();
    let mut primary: Option<String> = None;

    for group in group_by {
        let idx = columns.iter().position(|c| c == group).ok_or_else(|| {
            MechError::InvalidArgument(format!(
                "group-by column '{}' must also be listed in --columns",
                group
            ))
        })?;

        let mut column: Vec<String> = cells.iter().map(|row| row[idx].clone()).collect();
        let spec = render::multirow(&mut column);
        for (row, value) in cells.iter_mut().zip(column) {
            row[idx] = value;
        }

        let spec = match &primary {
            None => {
                primary = Some(spec.clone());
                spec
            }
            Some(base) => render::unique_hline(base, &spec),
        };
        if !spec.starts_with("hline{}") {
            hlines.push(spec);
        }
    }

    Ok(hlines)
}
