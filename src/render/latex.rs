//! # LaTeX 表格生成
//!
//! - 数值 / 矩阵格式化为 `bmatrix`
//! - 合并连续重复的单元格 (`\SetCell[r=N]{m}`) 并生成 `hline{...}` 规格
//! - 输出 tabularray `tblr` 环境
//!
//! ## 依赖关系
//! - 被 `commands/table.rs` 使用
//! - 使用 `regex`

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static HLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"hline\{([0-9,\s]*)\}").unwrap());

/// 格式化单个数值
///
/// |x| < 1e-10 输出 `0`；0.01 <= |x| < 1000 保留三位小数；
/// 其余使用 `1.23e^{-05}` 形式的科学计数法。
pub fn format_entry(x: f64) -> String {
    let abs = x.abs();
    if abs < 1e-10 {
        return "0".to_string();
    }
    if (0.01..1000.0).contains(&abs) {
        return format!("{:.3}", x);
    }

    let sci = format!("{:.2e}", x);
    match sci.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e^{{{}{:02}}}", mantissa, sign, exp.abs())
        }
        None => sci,
    }
}

/// 任意行数的数值矩阵转为行内 `bmatrix`
pub fn matrix_to_latex<R: AsRef<[f64]>>(rows: &[R]) -> String {
    let body = rows
        .iter()
        .map(|row| {
            row.as_ref()
                .iter()
                .map(|&x| format_entry(x))
                .collect::<Vec<_>>()
                .join(" & ")
        })
        .collect::<Vec<_>>()
        .join(" \\\\ ");

    format!("\\( \\begin{{bmatrix}} {} \\end{{bmatrix}} \\)", body)
}

fn hline_spec(lines: &[usize]) -> String {
    let joined = lines
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("hline{{{}}} = {{1pt}}", joined)
}

/// 合并一列中连续重复的值
///
/// 每组的第一个单元格替换为 `\SetCell[r=N]{m} {value}`，其余置空。
/// 返回组边界处的 hline 规格（表头为第 1 行，数据第 i 行为第 i+2 行）。
pub fn multirow(column: &mut [String]) -> String {
    let mut lines = Vec::new();
    if column.is_empty() {
        return hline_spec(&lines);
    }

    let mut start = 0;
    for index in 1..=column.len() {
        let run_ends = index == column.len() || column[index] != column[start];
        if !run_ends {
            continue;
        }

        let run = index - start;
        if run > 1 {
            let value = column[start].clone();
            column[start] = format!("\\SetCell[r={}]{{m}} {{{}}}", run, value);
            for cell in &mut column[start + 1..index] {
                cell.clear();
            }
        }
        if index < column.len() {
            lines.push(index + 2);
        }
        start = index;
    }

    hline_spec(&lines)
}

fn hline_numbers(spec: &str) -> BTreeSet<usize> {
    HLINE
        .captures(spec)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect()
        })
        .unwrap_or_default()
}

/// `sub` 中不在 `base` 里出现的 hline 编号
pub fn unique_hline(base: &str, sub: &str) -> String {
    let base = hline_numbers(base);
    let unique: Vec<usize> = hline_numbers(sub).difference(&base).copied().collect();
    hline_spec(&unique)
}

/// 转义 LaTeX 文本模式中的特殊字符
pub(crate) fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '_' | '%' | '&' | '#' | '$' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// 表格渲染选项
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// 额外的 hline 规格（如 `multirow` 的返回值）
    pub hlines: Vec<String>,
    pub caption: Option<String>,
}

/// 输出 tabularray `tblr` 表格
pub fn render_table(headers: &[String], rows: &[Vec<String>], options: &TableOptions) -> String {
    let mut out = String::new();

    if let Some(caption) = &options.caption {
        out.push_str("\\begin{table}[ht]\n\\centering\n");
        out.push_str(&format!("\\caption{{{}}}\n", escape_text(caption)));
    }

    out.push_str("\\begin{tblr}{\n");
    out.push_str(&format!("  colspec = {{{}}},\n", "Q[c,m]".repeat(headers.len())));
    out.push_str("  row{1} = {font=\\bfseries},\n");
    out.push_str(&format!("  hline{{1,2,{}}} = {{1pt}},\n", rows.len() + 2));
    for spec in &options.hlines {
        out.push_str(&format!("  {},\n", spec));
    }
    out.push_str("}\n");

    let header_line = headers
        .iter()
        .map(|h| escape_text(h))
        .collect::<Vec<_>>()
        .join(" & ");
    out.push_str(&format!("{} \\\\\n", header_line));

    for row in rows {
        out.push_str(&format!("{} \\\\\n", row.join(" & ")));
    }

    out.push_str("\\end{tblr}\n");
    if options.caption.is_some() {
        out.push_str("\\end{table}\n");
    }
    out
}
