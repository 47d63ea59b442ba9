//! # 晶胞数据表读取
//!
//! 读取 `mc_data.csv`，只保留全部必需列都存在且非缺失的行，
//! 并把每行转换为带类型的 `CellRow`（角度在此由度转为弧度）。
//!
//! ## 依赖关系
//! - 被 `commands/calc.rs` 使用
//! - 使用 `csv` 库

use crate::error::{MechError, Result};
use crate::models::UnitCell;

use std::io::Read;
use std::path::Path;

/// 十二个晶胞参数列
pub const CELL_COLUMNS: [&str; 12] = [
    "a_ref",
    "b_ref",
    "c_ref",
    "a_def",
    "b_def",
    "c_def",
    "alpha_ref",
    "beta_ref",
    "gamma_ref",
    "alpha_def",
    "beta_def",
    "gamma_def",
];

/// 视为缺失的单元格内容（不区分大小写）
const MISSING_MARKERS: [&str; 6] = ["", "nan", "na", "n/a", "null", "none"];

fn is_missing(value: &str) -> bool {
    let v = value.trim();
    MISSING_MARKERS.iter().any(|m| v.eq_ignore_ascii_case(m))
}

/// 一行有效数据
#[derive(Debug, Clone)]
pub struct CellRow {
    /// 数据行号（从 1 开始，不含表头）
    pub line: usize,
    pub reference: UnitCell,
    pub deformed: UnitCell,
    /// 附加列 (列名, 原始值)，顺序与请求一致
    pub extras: Vec<(String, String)>,
}

impl CellRow {
    /// 获取附加列的值
    pub fn extra(&self, column: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

/// 过滤后的数据集
#[derive(Debug, Default)]
pub struct Dataset {
    pub rows: Vec<CellRow>,
    /// 因缺失或非数值而被排除的行号
    pub dropped: Vec<usize>,
    pub extra_columns: Vec<String>,
}

/// 从文件读取数据集
pub fn load_rows(path: &Path, extra_columns: &[String]) -> Result<Dataset> {
    if !path.exists() {
        return Err(MechError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(MechError::CsvError)?;

    read_rows(reader, &path.display().to_string(), extra_columns)
}

/// 从任意 CSV reader 读取数据集
pub fn read_rows<R: Read>(
    mut reader: csv::Reader<R>,
    source: &str,
    extra_columns: &[String],
) -> Result<Dataset> {
    let headers = reader.headers().map_err(MechError::CsvError)?.clone();

    let column_index = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| MechError::MissingColumn {
                column: name.to_string(),
                path: source.to_string(),
            })
    };

    let mut cell_idx = [0usize; 12];
    for (slot, name) in cell_idx.iter_mut().zip(CELL_COLUMNS) {
        *slot = column_index(name)?;
    }
    let extra_idx: Vec<usize> = extra_columns
        .iter()
        .map(|name| column_index(name))
        .collect::<Result<_>>()?;

    let mut dataset = Dataset {
        extra_columns: extra_columns.to_vec(),
        ..Dataset::default()
    };

    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(MechError::CsvError)?;
        let line = i + 1;

        let mut values = [0.0; 12];
        let mut complete = true;
        for (value, &idx) in values.iter_mut().zip(cell_idx.iter()) {
            match record.get(idx).filter(|s| !is_missing(s)) {
                Some(s) => match s.trim().parse::<f64>() {
                    Ok(v) if v.is_finite() => *value = v,
                    _ => complete = false,
                },
                None => complete = false,
            }
        }

        let mut extras = Vec::with_capacity(extra_idx.len());
        for (name, &idx) in extra_columns.iter().zip(extra_idx.iter()) {
            match record.get(idx).filter(|s| !is_missing(s)) {
                Some(s) => extras.push((name.clone(), s.trim().to_string())),
                None => complete = false,
            }
        }

        if !complete {
            dataset.dropped.push(line);
            continue;
        }

        #[rustfmt::skip]
        let [
            a_ref, b_ref, c_ref,
            a_def, b_def, c_def,
            alpha_ref, beta_ref, gamma_ref,
            alpha_def, beta_def, gamma_def,
        ] = values;

        dataset.rows.push(CellRow {
            line,
            reference: UnitCell::from_degrees(a_ref, b_ref, c_ref, alpha_ref, beta_ref, gamma_ref),
            deformed: UnitCell::from_degrees(a_def, b_def, c_def, alpha_def, beta_def, gamma_def),
            extras,
        });
    }

    Ok(dataset)
}
