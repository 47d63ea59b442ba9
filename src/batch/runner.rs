//! # 批量执行器
//!
//! 并行执行逐行计算任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，每行写入自己的结果槽位（保持输入顺序）
//! - 进度条显示
//! - 成功 / 失败分流：单行失败不会中止整批
//!
//! ## 依赖关系
//! - 被 `commands/calc.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::data::CellRow;
use crate::error::{MechError, Result};
use crate::models::{RowFailure, RowRecord};
use crate::utils::progress;

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 单行处理结果
#[derive(Debug, Clone)]
pub enum RowOutcome {
    /// 计算成功（可能附带可报告条件）
    Computed(Box<RowRecord>),
    /// 硬错误，该行被排除
    Failed(RowFailure),
}

/// 批量处理结果
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功记录（按输入顺序）
    pub records: Vec<RowRecord>,
    /// 失败详情
    pub failures: Vec<RowFailure>,
    /// 带可报告条件的成功行数
    pub flagged: usize,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Computed(record) => {
                if record.has_conditions() {
                    self.flagged += 1;
                }
                self.records.push(*record);
            }
            RowOutcome::Failed(failure) => self.failures.push(failure),
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs == 0` 时使用全部核心
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理数据行
    pub fn run<F>(&self, rows: &[CellRow], processor: F) -> Result<BatchResult>
    where
        F: Fn(&CellRow) -> Result<RowRecord> + Sync + Send,
    {
        let pb = progress::create_progress_bar(rows.len() as u64, "Evaluating rows");
        let failed_count = AtomicUsize::new(0);

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| MechError::Other(format!("Failed to build thread pool: {}", e)))?;

        let outcomes: Vec<RowOutcome> = pool.install(|| {
            rows.par_iter()
                .map(|row| {
                    let outcome = match processor(row) {
                        Ok(record) => RowOutcome::Computed(Box::new(record)),
                        Err(e) => {
                            failed_count.fetch_add(1, Ordering::Relaxed);
                            RowOutcome::Failed(RowFailure {
                                line: row.line,
                                kind: e.kind().to_string(),
                                message: e.to_string(),
                            })
                        }
                    };

                    pb.inc(1);
                    if failed_count.load(Ordering::Relaxed) > 0 {
                        pb.set_message(format!(
                            "Evaluating rows ({} failed)",
                            failed_count.load(Ordering::Relaxed)
                        ));
                    }
                    outcome
                })
                .collect()
        });

        pb.finish_and_clear();

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for outcome in outcomes {
            batch_result.merge(outcome);
        }

        Ok(batch_result)
    }
}
