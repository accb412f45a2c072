//! 報表服務：讀取 → 計算
//!
//! 三組資料並行讀取，全部成功後才開始計算；任一讀取失敗即整體失敗，不產生部分報表。

use chrono::{DateTime, Utc};
use invperf_core::{AnalysisPeriod, InventoryDataSource, PerfError};

use crate::{PerformanceCalculator, PerformanceReport};

/// 庫存績效報表服務
pub struct ReportService<S> {
    source: S,
    calculator: PerformanceCalculator,
}

impl<S: InventoryDataSource> ReportService<S> {
    /// 創建新的報表服務
    pub fn new(source: S, calculator: PerformanceCalculator) -> Self {
        Self { source, calculator }
    }

    /// 產生指定組織、期間的報表
    pub fn generate(
        &self,
        org_id: &str,
        period: AnalysisPeriod,
        now: DateTime<Utc>,
    ) -> invperf_core::Result<PerformanceReport> {
        let since = period.since(now);
        let limit = self.calculator.config().recent_count_limit;

        tracing::debug!("讀取報表資料：組織 {}，期間 {}，起點 {}", org_id, period, since);

        let (items, (movements, counts)) = rayon::join(
            || self.source.fetch_inventory_items(org_id),
            || {
                rayon::join(
                    || self.source.fetch_movements(org_id, since),
                    || self.source.fetch_recent_completed_counts(org_id, limit),
                )
            },
        );

        let items = items.map_err(|e| Self::fetch_failed("庫存品項", e))?;
        let movements = movements.map_err(|e| Self::fetch_failed("庫存異動", e))?;
        let counts = counts.map_err(|e| Self::fetch_failed("盤點明細", e))?;

        Ok(self
            .calculator
            .calculate(period, &items, &movements, &counts, now))
    }

    fn fetch_failed(what: &str, err: PerfError) -> PerfError {
        tracing::error!("讀取{}失敗: {}", what, err);
        match err {
            PerfError::DataFetch(msg) => PerfError::DataFetch(format!("{}: {}", what, msg)),
            other => PerfError::DataFetch(format!("{}: {}", what, other)),
        }
    }

    /// 獲取資料來源引用
    pub fn source(&self) -> &S {
        &self.source
    }

    /// 獲取計算器引用
    pub fn calculator(&self) -> &PerformanceCalculator {
        &self.calculator
    }
}
