//! 庫存精確度分析
//!
//! 比較帳面數量與最近一次實盤數量。沒有盤點紀錄的品項視為帳實相符。

use invperf_core::{AccuracyResult, CountRecord, InventoryItem};
use rayon::prelude::*;
use invperf_core::numeric;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// 精確度分析器
pub struct AccuracyAnalyzer;

impl AccuracyAnalyzer {
    /// 執行精確度分析（結果保持品項輸入順序）
    pub fn analyze(items: &[InventoryItem], counts: &[CountRecord]) -> Vec<AccuracyResult> {
        let latest = Self::latest_counts(counts);

        let results: Vec<AccuracyResult> = items
            .par_iter()
            .map(|item| Self::analyze_item(item, latest.get(item.id.as_str()).copied()))
            .collect();

        tracing::debug!(
            "精確度分析完成：{} 個品項，{} 個有盤點紀錄",
            results.len(),
            results.iter().filter(|r| r.was_counted()).count()
        );

        results
    }

    /// 每個品項取完成時間最新的盤點明細，同時間者取先出現的一筆
    fn latest_counts(counts: &[CountRecord]) -> HashMap<&str, &CountRecord> {
        let mut latest: HashMap<&str, &CountRecord> = HashMap::new();

        for line in counts {
            latest
                .entry(line.item_id.as_str())
                .and_modify(|current| {
                    if line.count_completed_at > current.count_completed_at {
                        *current = line;
                    }
                })
                .or_insert(line);
        }

        latest
    }

    fn analyze_item(item: &InventoryItem, count: Option<&CountRecord>) -> AccuracyResult {
        let system_quantity = item.quantity;
        let physical_quantity = count.map_or(system_quantity, |c| c.counted_quantity);
        let variance = physical_quantity.saturating_sub(system_quantity);

        let variance_percentage = if system_quantity.is_zero() {
            Decimal::ZERO
        } else {
            numeric::mul_saturating(
                numeric::div_saturating(variance, system_quantity, "差異百分比"),
                Decimal::ONE_HUNDRED,
                "差異百分比",
            )
        };

        AccuracyResult {
            item_id: item.id.clone(),
            part_code: item.part_code.clone(),
            part_name: item.part_name.clone(),
            unit_cost: item.unit_cost,
            system_quantity,
            physical_quantity,
            variance,
            variance_percentage,
            variance_value: numeric::mul_saturating(variance, item.unit_cost, "差異金額"),
            accuracy_score: Self::score(variance_percentage),
            last_counted_at: count.map(|c| c.count_completed_at),
        }
    }

    /// 精確度分數 = max(0, 100 − |差異百分比|)
    pub fn score(variance_percentage: Decimal) -> Decimal {
        Decimal::ONE_HUNDRED
            .saturating_sub(variance_percentage.abs())
            .max(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, day, 18, 0, 0).unwrap()
    }

    fn item(id: &str, quantity: i64, unit_cost: i64) -> InventoryItem {
        InventoryItem::new(id.to_string(), Decimal::from(quantity), Decimal::from(unit_cost))
    }

    fn line(count_id: &str, item_id: &str, counted: i64, day: u32) -> CountRecord {
        CountRecord::new(
            count_id.to_string(),
            item_id.to_string(),
            Decimal::from(counted),
            at(day),
        )
    }

    #[test]
    fn test_no_count_is_fully_accurate() {
        let results = AccuracyAnalyzer::analyze(&[item("1", 40, 5)], &[]);

        let r = &results[0];
        assert_eq!(r.physical_quantity, Decimal::from(40));
        assert_eq!(r.variance, Decimal::ZERO);
        assert_eq!(r.variance_value, Decimal::ZERO);
        assert_eq!(r.accuracy_score, Decimal::ONE_HUNDRED);
        assert!(!r.was_counted());
    }

    #[test]
    fn test_shortage_variance() {
        let results = AccuracyAnalyzer::analyze(&[item("1", 40, 5)], &[line("C1", "1", 36, 3)]);

        let r = &results[0];
        assert_eq!(r.variance, Decimal::from(-4));
        assert_eq!(r.variance_percentage, Decimal::from(-10));
        assert_eq!(r.variance_value, Decimal::from(-20));
        assert_eq!(r.accuracy_score, Decimal::from(90));
        assert_eq!(r.last_counted_at, Some(at(3)));
    }

    #[test]
    fn test_latest_count_wins() {
        let counts = vec![
            line("C1", "1", 30, 1),
            line("C3", "1", 44, 8),
            line("C2", "1", 38, 4),
        ];

        let results = AccuracyAnalyzer::analyze(&[item("1", 40, 1)], &counts);
        assert_eq!(results[0].physical_quantity, Decimal::from(44));
        assert_eq!(results[0].last_counted_at, Some(at(8)));
    }

    #[test]
    fn test_same_completion_time_first_line_wins() {
        let counts = vec![line("C1", "1", 39, 5), line("C1", "1", 12, 5)];

        let results = AccuracyAnalyzer::analyze(&[item("1", 40, 1)], &counts);
        assert_eq!(results[0].physical_quantity, Decimal::from(39));
    }

    #[test]
    fn test_zero_system_quantity() {
        // 帳面為 0 時差異百分比定義為 0
        let results = AccuracyAnalyzer::analyze(&[item("1", 0, 8)], &[line("C1", "1", 6, 2)]);

        let r = &results[0];
        assert_eq!(r.variance, Decimal::from(6));
        assert_eq!(r.variance_percentage, Decimal::ZERO);
        assert_eq!(r.variance_value, Decimal::from(48));
        assert_eq!(r.accuracy_score, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_score_floor_at_zero() {
        let results = AccuracyAnalyzer::analyze(&[item("1", 10, 1)], &[line("C1", "1", 35, 2)]);

        assert_eq!(results[0].variance_percentage, Decimal::from(250));
        assert_eq!(results[0].accuracy_score, Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn prop_score_within_bounds(system in 0i64..10_000, counted in 0i64..100_000) {
            let results = AccuracyAnalyzer::analyze(
                &[item("X", system, 3)],
                &[line("C", "X", counted, 1)],
            );
            let score = results[0].accuracy_score;
            prop_assert!(score >= Decimal::ZERO);
            prop_assert!(score <= Decimal::ONE_HUNDRED);
        }

        #[test]
        fn prop_score_bounds_any_percentage(mantissa in any::<i64>(), scale in 0u32..10) {
            let score = AccuracyAnalyzer::score(Decimal::new(mantissa, scale));
            prop_assert!(score >= Decimal::ZERO && score <= Decimal::ONE_HUNDRED);
        }
    }
}
