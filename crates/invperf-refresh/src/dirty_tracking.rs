//! 髒標記追蹤

use invperf_core::AnalysisPeriod;
use std::collections::HashSet;

/// 期間髒標記追蹤器（底層資料變動後，哪些期間的報表需要重算）
#[derive(Debug, Default)]
pub struct DirtyTracker {
    dirty_periods: HashSet<AnalysisPeriod>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self {
            dirty_periods: HashSet::new(),
        }
    }

    /// 標記期間為髒
    pub fn mark_dirty(&mut self, period: AnalysisPeriod) {
        self.dirty_periods.insert(period);
    }

    /// 標記所有期間為髒
    pub fn mark_all(&mut self) {
        self.dirty_periods.extend(AnalysisPeriod::ALL);
    }

    /// 檢查期間是否為髒
    pub fn is_dirty(&self, period: AnalysisPeriod) -> bool {
        self.dirty_periods.contains(&period)
    }

    /// 清除單一期間的髒標記
    pub fn clear(&mut self, period: AnalysisPeriod) {
        self.dirty_periods.remove(&period);
    }

    /// 獲取所有髒期間（由短到長）
    pub fn get_dirty_periods(&self) -> Vec<AnalysisPeriod> {
        let mut periods: Vec<_> = self.dirty_periods.iter().copied().collect();
        periods.sort();
        periods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_mark_and_clear() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_dirty(AnalysisPeriod::Days90);

        assert!(tracker.is_dirty(AnalysisPeriod::Days90));
        assert!(!tracker.is_dirty(AnalysisPeriod::Days30));

        tracker.clear(AnalysisPeriod::Days90);
        assert!(tracker.get_dirty_periods().is_empty());
    }

    #[test]
    fn test_mark_all_sorted() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_all();

        assert_eq!(tracker.get_dirty_periods(), AnalysisPeriod::ALL.to_vec());
    }

    #[rstest]
    #[case(AnalysisPeriod::Days30)]
    #[case(AnalysisPeriod::Days90)]
    #[case(AnalysisPeriod::Days180)]
    #[case(AnalysisPeriod::Days365)]
    fn test_clear_only_touches_one_period(#[case] period: AnalysisPeriod) {
        let mut tracker = DirtyTracker::new();
        tracker.mark_all();
        tracker.clear(period);

        assert!(!tracker.is_dirty(period));
        assert_eq!(tracker.get_dirty_periods().len(), 3);
    }
}
