//! 彙總指標

use invperf_core::{AbcResult, AccuracyResult, PerformanceMetrics, TurnoverClass, TurnoverResult};
use invperf_core::numeric;
use rust_decimal::Decimal;

/// 指標彙總器
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// 將三組分析結果彙總為儀表板指標（完整結果集，不做篩選）
    pub fn aggregate(
        abc: &[AbcResult],
        turnover: &[TurnoverResult],
        accuracy: &[AccuracyResult],
    ) -> PerformanceMetrics {
        let mut metrics = PerformanceMetrics::empty();

        metrics.total_items = abc.len();

        for result in abc {
            metrics.total_value = metrics.total_value.saturating_add(result.total_value);
            metrics
                .abc_distribution
                .entry(result.abc_class)
                .or_default()
                .add(result.total_value);
        }

        for result in turnover {
            metrics
                .turnover_distribution
                .entry(result.classification)
                .or_default()
                .add(result.total_value);

            match result.classification {
                TurnoverClass::Dead => {
                    metrics.dead_stock_value =
                        metrics.dead_stock_value.saturating_add(result.total_value)
                }
                TurnoverClass::Fast => metrics.fast_moving_items += 1,
                _ => {}
            }
        }

        metrics.average_accuracy =
            Self::mean(accuracy.iter().map(|r| r.accuracy_score), accuracy.len());
        metrics.average_turnover =
            Self::mean(turnover.iter().map(|r| r.turnover_rate), turnover.len());

        metrics
    }

    fn mean(values: impl Iterator<Item = Decimal>, len: usize) -> Decimal {
        if len == 0 {
            return Decimal::ZERO;
        }
        numeric::saturating_sum(values) / Decimal::from(len)
    }
}
