//! # 逐行结果记录
//!
//! 核心计算对外暴露的扁平记录：表格渲染与 CSV 导出只依赖这里的列，
//! 不需要知道数值是如何得到的。
//!
//! ## 依赖关系
//! - 由 `mech/row.rs` 构造
//! - 被 `commands/calc.rs` 写出

use super::condition::{join_kinds, Condition};
use super::tensor::TwinSolution;
use nalgebra::{Matrix3, Vector3};
use serde::Serialize;

/// 单行成功结果
#[derive(Debug, Clone)]
pub struct RowRecord {
    /// 源文件中的数据行号（从 1 开始，不含表头）
    pub line: usize,
    /// 调用者请求的附加列（原样保留）
    pub extras: Vec<(String, String)>,
    pub deformation: Matrix3<f64>,
    pub volume_ratio: f64,
    pub stretch: Matrix3<f64>,
    pub rotation: Matrix3<f64>,
    /// U 的主伸缩，升序
    pub principal_stretches: [f64; 3],
    pub lambdas: [f64; 3],
    pub eigenvectors: Matrix3<f64>,
    pub twins: Option<[TwinSolution; 2]>,
    /// Miller 方向与惯习面法向的最小夹角（度）
    pub theta: Option<f64>,
    pub conditions: Vec<Condition>,
}

/// 单行失败记录
#[derive(Debug, Clone, Serialize)]
pub struct RowFailure {
    pub line: usize,
    pub kind: String,
    pub message: String,
}

fn matrix_headers(prefix: &str) -> Vec<String> {
    let mut headers = Vec::with_capacity(9);
    for i in 1..=3 {
        for j in 1..=3 {
            headers.push(format!("{}{}{}", prefix, i, j));
        }
    }
    headers
}

fn vector_headers(prefix: &str) -> Vec<String> {
    ["x", "y", "z"]
        .iter()
        .map(|axis| format!("{}_{}", prefix, axis))
        .collect()
}

fn matrix_fields(m: &Matrix3<f64>) -> Vec<String> {
    let mut fields = Vec::with_capacity(9);
    for i in 0..3 {
        for j in 0..3 {
            fields.push(format!("{:.10}", m[(i, j)]));
        }
    }
    fields
}

fn vector_fields(v: Option<&Vector3<f64>>) -> Vec<String> {
    match v {
        Some(v) => v.iter().map(|x| format!("{:.10}", x)).collect(),
        None => vec![String::new(); 3],
    }
}

impl RowRecord {
    /// CSV 表头（附加列在前）
    pub fn headers(extra_columns: &[String]) -> Vec<String> {
        let mut headers = vec!["line".to_string()];
        headers.extend(extra_columns.iter().cloned());
        headers.extend(matrix_headers("f"));
        headers.push("det_f".to_string());
        headers.extend(matrix_headers("u"));
        headers.extend(matrix_headers("q"));
        headers.extend(["s1", "s2", "s3"].iter().map(|s| s.to_string()));
        headers.extend(["lam1", "lam2", "lam3"].iter().map(|s| s.to_string()));
        for e in ["e1", "e2", "e3"] {
            headers.extend(vector_headers(e));
        }
        for twin in ["n_plus", "a_plus", "n_minus", "a_minus"] {
            headers.extend(vector_headers(twin));
        }
        headers.push("theta".to_string());
        headers.push("conditions".to_string());
        headers
    }

    /// 与 `headers` 对齐的字段
    pub fn fields(&self) -> Vec<String> {
        let mut fields = vec![self.line.to_string()];
        fields.extend(self.extras.iter().map(|(_, v)| v.clone()));
        fields.extend(matrix_fields(&self.deformation));
        fields.push(format!("{:.10}", self.volume_ratio));
        fields.extend(matrix_fields(&self.stretch));
        fields.extend(matrix_fields(&self.rotation));
        fields.extend(self.principal_stretches.iter().map(|x| format!("{:.10}", x)));
        fields.extend(self.lambdas.iter().map(|x| format!("{:.10}", x)));
        for i in 0..3 {
            let e = self.eigenvectors.column(i).into_owned();
            fields.extend(vector_fields(Some(&e)));
        }
        for i in 0..2 {
            let twin = self.twins.as_ref().map(|t| &t[i]);
            fields.extend(vector_fields(twin.map(|t| &t.normal)));
            fields.extend(vector_fields(twin.map(|t| &t.shear)));
        }
        fields.push(self.theta.map(|t| format!("{:.6}", t)).unwrap_or_default());
        fields.push(join_kinds(&self.conditions));
        fields
    }

    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }
}
