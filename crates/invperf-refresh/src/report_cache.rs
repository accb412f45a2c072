//! 報表快取
//!
//! 每個期間保留最後一份成功套用的報表。刷新失敗時保留舊報表；
//! 被更新的刷新取代的結果直接丟棄，不會覆蓋畫面上的資料。

use chrono::{DateTime, Utc};
use invperf_calc::{PerformanceReport, ReportService};
use invperf_core::{AnalysisPeriod, InventoryDataSource, PerfError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{DirtyTracker, GenerationCounter, RefreshTicket};

/// 套用結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// 已套用為最新報表
    Applied,
    /// 已被更新的刷新取代，結果丟棄
    Discarded,
}

#[derive(Debug, Default)]
struct CacheState {
    reports: HashMap<AnalysisPeriod, Arc<PerformanceReport>>,
    dirty: DirtyTracker,
}

/// 報表快取
#[derive(Debug, Default)]
pub struct ReportCache {
    state: Mutex<CacheState>,
    generations: GenerationCounter,
}

impl ReportCache {
    /// 創建新的快取
    pub fn new() -> Self {
        Self::default()
    }

    /// 開始刷新（期間切換或手動刷新時呼叫）
    pub fn begin_refresh(&self, period: AnalysisPeriod) -> RefreshTicket {
        let _state = self.lock();
        let ticket = self.generations.begin(period);
        tracing::debug!("開始刷新 {}，世代 {}", period, ticket.generation);
        ticket
    }

    /// 套用計算完成的報表；票據已過期則丟棄
    pub fn complete(&self, ticket: RefreshTicket, report: PerformanceReport) -> ApplyOutcome {
        let mut state = self.lock();

        if !self.generations.is_current(&ticket) {
            tracing::warn!(
                "丟棄過期報表：期間 {}，世代 {}（最新 {}）",
                ticket.period,
                ticket.generation,
                self.generations.latest()
            );
            return ApplyOutcome::Discarded;
        }

        state.reports.insert(ticket.period, Arc::new(report));
        state.dirty.clear(ticket.period);
        ApplyOutcome::Applied
    }

    /// 刷新失敗：保留舊報表，回傳仍可顯示的舊報表
    pub fn fail(&self, ticket: RefreshTicket, err: &PerfError) -> Option<Arc<PerformanceReport>> {
        let state = self.lock();
        tracing::error!(
            "刷新失敗：期間 {}，世代 {}：{}",
            ticket.period,
            ticket.generation,
            err
        );
        state.reports.get(&ticket.period).cloned()
    }

    /// 讀取、計算並套用
    pub fn refresh<S: InventoryDataSource>(
        &self,
        service: &ReportService<S>,
        org_id: &str,
        period: AnalysisPeriod,
        now: DateTime<Utc>,
    ) -> invperf_core::Result<ApplyOutcome> {
        let ticket = self.begin_refresh(period);

        match service.generate(org_id, period, now) {
            Ok(report) => Ok(self.complete(ticket, report)),
            Err(err) => {
                self.fail(ticket, &err);
                Err(err)
            }
        }
    }

    /// 取得期間的最新報表
    pub fn get(&self, period: AnalysisPeriod) -> Option<Arc<PerformanceReport>> {
        self.lock().reports.get(&period).cloned()
    }

    /// 底層資料變動：所有期間標記為需重算
    pub fn invalidate_all(&self) {
        self.lock().dirty.mark_all();
    }

    /// 單一期間標記為需重算
    pub fn invalidate(&self, period: AnalysisPeriod) {
        self.lock().dirty.mark_dirty(period);
    }

    /// 期間是否需要重算（尚無報表或已標記為髒）
    pub fn needs_refresh(&self, period: AnalysisPeriod) -> bool {
        let state = self.lock();
        !state.reports.contains_key(&period) || state.dirty.is_dirty(period)
    }

    /// 所有需要重算的期間
    pub fn stale_periods(&self) -> Vec<AnalysisPeriod> {
        let state = self.lock();
        let mut stale: Vec<AnalysisPeriod> = AnalysisPeriod::ALL
            .into_iter()
            .filter(|p| !state.reports.contains_key(p))
            .collect();
        stale.extend(state.dirty.get_dirty_periods());
        stale.sort();
        stale.dedup();
        stale
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    fn report(period: AnalysisPeriod) -> PerformanceReport {
        PerformanceReport::empty(period, now())
    }

    #[test]
    fn test_apply_current_ticket() {
        let cache = ReportCache::new();
        assert!(cache.needs_refresh(AnalysisPeriod::Days30));

        let ticket = cache.begin_refresh(AnalysisPeriod::Days30);
        let outcome = cache.complete(ticket, report(AnalysisPeriod::Days30));

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert!(cache.get(AnalysisPeriod::Days30).is_some());
        assert!(!cache.needs_refresh(AnalysisPeriod::Days30));
    }

    #[test]
    fn test_superseded_result_is_discarded() {
        let cache = ReportCache::new();

        // 使用者在第一次讀取完成前切換期間
        let stale = cache.begin_refresh(AnalysisPeriod::Days30);
        let fresh = cache.begin_refresh(AnalysisPeriod::Days90);

        assert_eq!(
            cache.complete(stale, report(AnalysisPeriod::Days30)),
            ApplyOutcome::Discarded
        );
        assert!(cache.get(AnalysisPeriod::Days30).is_none());

        assert_eq!(
            cache.complete(fresh, report(AnalysisPeriod::Days90)),
            ApplyOutcome::Applied
        );
    }

    #[test]
    fn test_failure_keeps_previous_report() {
        let cache = ReportCache::new();
        let first = cache.begin_refresh(AnalysisPeriod::Days90);
        let applied = report(AnalysisPeriod::Days90);
        let applied_id = applied.id;
        cache.complete(first, applied);

        let second = cache.begin_refresh(AnalysisPeriod::Days90);
        let previous = cache.fail(second, &PerfError::DataFetch("timeout".to_string()));

        assert_eq!(previous.map(|r| r.id), Some(applied_id));
        assert_eq!(cache.get(AnalysisPeriod::Days90).map(|r| r.id), Some(applied_id));
    }

    #[test]
    fn test_invalidate_marks_dirty() {
        let cache = ReportCache::new();
        for period in AnalysisPeriod::ALL {
            let ticket = cache.begin_refresh(period);
            cache.complete(ticket, report(period));
        }
        assert!(cache.stale_periods().is_empty());

        cache.invalidate(AnalysisPeriod::Days180);
        assert_eq!(cache.stale_periods(), vec![AnalysisPeriod::Days180]);

        cache.invalidate_all();
        assert_eq!(cache.stale_periods(), AnalysisPeriod::ALL.to_vec());
        // 舊報表在重算前仍可讀取
        assert!(cache.get(AnalysisPeriod::Days30).is_some());
    }

    #[test]
    fn test_stale_periods_merge_missing_and_dirty() {
        let cache = ReportCache::new();
        let ticket = cache.begin_refresh(AnalysisPeriod::Days90);
        cache.complete(ticket, report(AnalysisPeriod::Days90));
        cache.invalidate(AnalysisPeriod::Days30);

        // Days30 既缺報表又被標記，只列一次
        assert_eq!(
            cache.stale_periods(),
            vec![
                AnalysisPeriod::Days30,
                AnalysisPeriod::Days180,
                AnalysisPeriod::Days365
            ]
        );
    }
}
