//! # calc 命令实现
//!
//! 读取晶胞数据表，逐行并行计算微观力学量并写出结果。
//!
//! ## 功能
//! - 过滤缺失必需列的行
//! - 并行计算 F, det F, U, Q, 相容性特征值 / 特征向量, 孪晶解
//! - 成功行写入结果 CSV，失败行写入 `<stem>.failed.csv`
//! - 终端摘要表格与可报告条件汇总
//!
//! ## 依赖关系
//! - 使用 `cli/calc.rs` 定义的参数
//! - 使用 `data/`, `mech/`, `batch/`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchResult, BatchRunner};
use crate::cli::calc::CalcArgs;
use crate::data;
use crate::error::{MechError, Result};
use crate::mech::{self, RowOptions};
use crate::models::condition::join_kinds;
use crate::models::{RowFailure, RowRecord, Tolerance};
use crate::utils::output;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 每类条件最多列出的示例行数
const MAX_EXAMPLES: usize = 5;

/// 终端摘要行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Line")]
    line: usize,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "det F")]
    det_f: String,
    #[tabled(rename = "λ1")]
    lam1: String,
    #[tabled(rename = "λ2")]
    lam2: String,
    #[tabled(rename = "λ3")]
    lam3: String,
    #[tabled(rename = "Flags")]
    flags: String,
}

impl From<&RowRecord> for SummaryRow {
    fn from(r: &RowRecord) -> Self {
        SummaryRow {
            line: r.line,
            label: r
                .extras
                .iter()
                .map(|(_, v)| v.as_str())
                .collect::<Vec<_>>()
                .join(" / "),
            det_f: format!("{:.6}", r.volume_ratio),
            lam1: format!("{:.6}", r.lambdas[0]),
            lam2: format!("{:.6}", r.lambdas[1]),
            lam3: format!("{:.6}", r.lambdas[2]),
            flags: join_kinds(&r.conditions),
        }
    }
}

/// 执行 calc 命令
pub fn execute(args: CalcArgs) -> Result<()> {
    output::print_header("Micromechanics Calculation");

    if !(args.tol > 0.0 && args.tol.is_finite()) {
        return Err(MechError::InvalidArgument(format!(
            "tolerance must be a positive number, got {}",
            args.tol
        )));
    }

    let extras = args.required_extras();
    output::print_info(&format!("Reading '{}'", args.data.display()));
    let dataset = data::load_rows(&args.data, &extras)?;

    output::print_info(&format!(
        "Loaded {} rows ({} excluded for missing values)",
        dataset.rows.len(),
        dataset.dropped.len()
    ));

    if dataset.rows.is_empty() {
        output::print_warning("No complete rows to evaluate.");
        return Ok(());
    }

    let options = RowOptions {
        tol: Tolerance(args.tol),
        miller_column: args.miller.clone(),
    };

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));
    let result = runner.run(&dataset.rows, |row| mech::evaluate(row, &options))?;

    ensure_parent_dir(&args.output)?;
    save_records_csv(&result.records, &dataset.extra_columns, &args.output)?;
    output::print_success(&format!(
        "{} results saved to '{}'",
        result.records.len(),
        args.output.display()
    ));

    if !result.failures.is_empty() {
        let failed_path = failure_path(&args.output);
        save_failures_csv(&result.failures, &failed_path)?;
        output::print_warning(&format!(
            "{} rows failed; details saved to '{}'",
            result.failures.len(),
            failed_path.display()
        ));
    }

    print_summary(&result, args.top_n);
    report_conditions(&result);

    output::print_done(&format!(
        "{} of {} rows computed ({} flagged), {} failed",
        result.records.len(),
        result.total(),
        result.flagged,
        result.failures.len()
    ));

    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| MechError::FileWriteError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// 失败行文件路径：`results.csv` -> `results.failed.csv`
fn failure_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "results".to_string());
    output.with_file_name(format!("{}.failed.csv", stem))
}

/// 保存成功记录到 CSV
fn save_records_csv(records: &[RowRecord], extra_columns: &[String], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).map_err(MechError::CsvError)?;

    wtr.write_record(RowRecord::headers(extra_columns))
        .map_err(MechError::CsvError)?;
    for record in records {
        wtr.write_record(record.fields())
            .map_err(MechError::CsvError)?;
    }

    wtr.flush().map_err(|e| MechError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 保存失败记录到 CSV
fn save_failures_csv(failures: &[RowFailure], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).map_err(MechError::CsvError)?;

    for failure in failures {
        wtr.serialize(failure).map_err(MechError::CsvError)?;
    }

    wtr.flush().map_err(|e| MechError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 打印前 N 行摘要
fn print_summary(result: &BatchResult, top_n: usize) {
    if result.records.is_empty() || top_n == 0 {
        return;
    }

    output::print_header(&format!(
        "First {} Rows",
        top_n.min(result.records.len())
    ));

    let rows: Vec<SummaryRow> = result
        .records
        .iter()
        .take(top_n)
        .map(SummaryRow::from)
        .collect();
    println!("{}", Table::new(&rows));
}

/// 按类别汇总可报告条件与失败
fn report_conditions(result: &BatchResult) {
    let mut by_kind: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    for record in &result.records {
        for condition in &record.conditions {
            by_kind
                .entry(condition.kind())
                .or_default()
                .push(format!("line {}: {}", record.line, condition));
        }
    }

    for (kind, examples) in &by_kind {
        output::print_warning(&format!("{} rows flagged '{}'", examples.len(), kind));
        for example in examples.iter().take(MAX_EXAMPLES) {
            output::print_detail(example);
        }
    }

    for failure in result.failures.iter().take(MAX_EXAMPLES) {
        output::print_error(&format!(
            "line {} [{}]: {}",
            failure.line, failure.kind, failure.message
        ));
    }
}
