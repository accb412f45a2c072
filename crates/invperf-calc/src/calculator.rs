//! 庫存績效報表主計算器

use chrono::{DateTime, Utc};
use invperf_core::{AnalysisConfig, AnalysisPeriod, CountRecord, InventoryItem, Movement};
use std::collections::HashSet;

use crate::{
    AbcClassifier, AccuracyAnalyzer, MetricsAggregator, PerformanceReport, ReportWarning,
    TurnoverClassifier,
};

/// 庫存績效計算器
#[derive(Debug, Clone, Default)]
pub struct PerformanceCalculator {
    /// 分析參數
    config: AnalysisConfig,
}

impl PerformanceCalculator {
    /// 創建新的計算器
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// 主計算入口：三組輸入 → 完整報表
    ///
    /// 純計算，不修改輸入；相同輸入必得相同結果（報表ID與耗時除外）。
    pub fn calculate(
        &self,
        period: AnalysisPeriod,
        items: &[InventoryItem],
        movements: &[Movement],
        counts: &[CountRecord],
        generated_at: DateTime<Utc>,
    ) -> PerformanceReport {
        tracing::info!(
            "開始庫存績效計算（{}）：品項 {} 筆，異動 {} 筆，盤點明細 {} 筆",
            period,
            items.len(),
            movements.len(),
            counts.len()
        );

        let start_time = std::time::Instant::now();
        let config = &self.config;

        // Step 1: 三項分析互相獨立，並行執行
        tracing::debug!("Step 1: ABC / 週轉 / 精確度分析");
        let (abc, (turnover, accuracy)) = rayon::join(
            || AbcClassifier::classify(items, movements, period, config),
            || {
                rayon::join(
                    || TurnoverClassifier::classify(items, movements, period, config),
                    || AccuracyAnalyzer::analyze(items, counts),
                )
            },
        );

        // Step 2: 彙總指標
        tracing::debug!("Step 2: 彙總指標");
        let metrics = MetricsAggregator::aggregate(&abc, &turnover, &accuracy);

        let mut report = PerformanceReport::empty(period, generated_at);
        report.abc = abc;
        report.turnover = turnover;
        report.accuracy = accuracy;
        report.metrics = metrics;

        // Step 3: 資料品質檢查
        tracing::debug!("Step 3: 資料品質檢查");
        for warning in Self::collect_warnings(items, movements, counts) {
            report.add_warning(warning);
        }

        report.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("庫存績效計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "品項 {}，庫存總值 {}，呆滯價值 {}，警告 {} 筆",
            report.metrics.total_items,
            report.metrics.total_value,
            report.metrics.dead_stock_value,
            report.warnings.len()
        );

        report
    }

    /// 檢查會影響報表解讀的資料問題
    fn collect_warnings(
        items: &[InventoryItem],
        movements: &[Movement],
        counts: &[CountRecord],
    ) -> Vec<ReportWarning> {
        let mut warnings = Vec::new();

        let moved: HashSet<&str> = movements.iter().map(|m| m.item_id.as_str()).collect();
        for item in items {
            if item.unit_cost.is_zero() {
                warnings.push(ReportWarning::warning(
                    item.id.clone(),
                    "單位成本為 0，價值相關指標將為 0".to_string(),
                ));
            }
            if item.value_overflows() {
                warnings.push(ReportWarning::warning(
                    item.id.clone(),
                    "庫存總值超出數值範圍，以 0 計".to_string(),
                ));
            }
            if item.is_in_stock() && !moved.contains(item.id.as_str()) {
                warnings.push(ReportWarning::info(
                    item.id.clone(),
                    "分析期間內無任何異動".to_string(),
                ));
            }
        }

        let known: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
        let mut reported: HashSet<&str> = HashSet::new();
        for line in counts {
            let item_id = line.item_id.as_str();
            if !known.contains(item_id) && reported.insert(item_id) {
                warnings.push(ReportWarning::warning(
                    line.item_id.clone(),
                    format!("盤點單 {} 參照不存在的品項", line.count_id),
                ));
            }
        }

        warnings
    }

    /// 獲取分析參數引用
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WarningSeverity;
    use chrono::TimeZone;
    use invperf_core::{AbcClass, TurnoverClass};
    use rust_decimal::Decimal;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_calculate_full_report() {
        let items = vec![
            InventoryItem::new("1".to_string(), Decimal::from(100), Decimal::from(10)),
            InventoryItem::new("2".to_string(), Decimal::from(5), Decimal::ZERO),
        ];
        let movements = vec![Movement::outbound("1".to_string(), Decimal::from(50), now())];
        let counts = vec![CountRecord::new(
            "CNT-1".to_string(),
            "1".to_string(),
            Decimal::from(98),
            now(),
        )];

        let calculator = PerformanceCalculator::default();
        let report = calculator.calculate(AnalysisPeriod::Days30, &items, &movements, &counts, now());

        assert_eq!(report.period, AnalysisPeriod::Days30);
        assert_eq!(report.generated_at, now());
        assert_eq!(report.abc.len(), 2);
        assert_eq!(report.turnover.len(), 2);
        assert_eq!(report.accuracy.len(), 2);
        assert_eq!(report.abc[0].item_id, "1");
        assert_eq!(report.abc[0].abc_class, AbcClass::A);
        assert_eq!(report.turnover[0].classification, TurnoverClass::Medium);
        assert_eq!(report.accuracy[0].accuracy_score, Decimal::from(98));
        assert_eq!(report.metrics.total_items, 2);
        assert!(report.calculation_time_ms.is_some());
    }

    #[test]
    fn test_data_quality_warnings() {
        let items = vec![
            InventoryItem::new("FREE".to_string(), Decimal::from(3), Decimal::ZERO),
            InventoryItem::new("IDLE".to_string(), Decimal::from(3), Decimal::ONE),
        ];
        let movements = vec![Movement::outbound("FREE".to_string(), Decimal::ONE, now())];
        let counts = vec![
            CountRecord::new("CNT-9".to_string(), "GHOST".to_string(), Decimal::ONE, now()),
            CountRecord::new("CNT-8".to_string(), "GHOST".to_string(), Decimal::ONE, now()),
        ];

        let report = PerformanceCalculator::default().calculate(
            AnalysisPeriod::Days90,
            &items,
            &movements,
            &counts,
            now(),
        );

        assert_eq!(report.warnings.len(), 3);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.item_id == "FREE" && w.severity == WarningSeverity::Warning));
        assert!(report
            .warnings
            .iter()
            .any(|w| w.item_id == "IDLE" && w.severity == WarningSeverity::Info));
        assert_eq!(
            report.warnings.iter().filter(|w| w.item_id == "GHOST").count(),
            1
        );
    }

    #[test]
    fn test_empty_report() {
        let report = PerformanceCalculator::default().calculate(
            AnalysisPeriod::Days365,
            &[],
            &[],
            &[],
            now(),
        );

        assert!(report.abc.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.metrics.total_value, Decimal::ZERO);
        assert_eq!(report.metrics.average_accuracy, Decimal::ZERO);
    }

    #[test]
    fn test_out_of_range_value_still_renders() {
        let json = r#"{"id": "BIG", "quantity": "50000000000000000000", "unit_cost": "9000000000"}"#;
        let items = vec![
            serde_json::from_str::<InventoryItem>(json).unwrap(),
            InventoryItem::new("OK".to_string(), Decimal::from(10), Decimal::from(5)),
        ];
        let movements = vec![Movement::outbound("OK".to_string(), Decimal::from(20), now())];

        let report = PerformanceCalculator::default().calculate(
            AnalysisPeriod::Days90,
            &items,
            &movements,
            &[],
            now(),
        );

        assert_eq!(report.metrics.total_items, 2);
        assert_eq!(report.metrics.total_value, Decimal::from(50));
        assert_eq!(report.turnover[0].total_value, Decimal::ZERO);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.item_id == "BIG" && w.severity == WarningSeverity::Warning));
    }

    #[test]
    fn test_trickle_consumption_uses_no_depletion_days() {
        let items = vec![InventoryItem::new(
            "1".to_string(),
            Decimal::from(1_000_000),
            Decimal::from(10),
        )];
        let movements = vec![Movement::outbound("1".to_string(), Decimal::new(1, 28), now())];

        let report = PerformanceCalculator::default().calculate(
            AnalysisPeriod::Days365,
            &items,
            &movements,
            &[],
            now(),
        );

        assert_eq!(report.turnover[0].days_of_supply, Decimal::from(999));
        assert_eq!(report.abc[0].days_of_supply, Decimal::from(999));
        assert_eq!(report.turnover[0].classification, TurnoverClass::Dead);
    }
}
