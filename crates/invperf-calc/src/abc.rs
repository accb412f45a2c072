//! ABC 分析
//!
//! 依年耗用價值排序，累計價值 ≤ 80% 為 A、≤ 95% 為 B，其餘為 C。
//! 累計百分比需要一次完整排序後依序掃描，無法逐品項獨立計算。

use invperf_core::{AbcClass, AbcResult, AnalysisConfig, AnalysisPeriod, InventoryItem, Movement};
use rayon::prelude::*;
use invperf_core::numeric;
use rust_decimal::Decimal;
use std::cmp::Ordering;

use crate::consumption::ConsumptionCalculator;

/// ABC 分類器
pub struct AbcClassifier;

impl AbcClassifier {
    /// 執行 ABC 分析，結果依年耗用價值遞減排序
    pub fn classify(
        items: &[InventoryItem],
        movements: &[Movement],
        period: AnalysisPeriod,
        config: &AnalysisConfig,
    ) -> Vec<AbcResult> {
        let profiles = ConsumptionCalculator::profiles(movements, period);

        // Step 1: 逐品項計算年耗用（可並行）
        let mut results: Vec<AbcResult> = items
            .par_iter()
            .map(|item| {
                let annual_consumption = profiles
                    .get(&item.id)
                    .map(|p| p.annual_consumption)
                    .unwrap_or(Decimal::ZERO);

                AbcResult {
                    item_id: item.id.clone(),
                    part_code: item.part_code.clone(),
                    part_name: item.part_name.clone(),
                    quantity: item.quantity,
                    unit_cost: item.unit_cost,
                    total_value: item.total_value(),
                    annual_consumption,
                    annual_value: numeric::mul_or(
                        annual_consumption,
                        item.unit_cost,
                        Decimal::ZERO,
                        "年耗用價值",
                    ),
                    abc_class: AbcClass::C,
                    percentage_value: Decimal::ZERO,
                    cumulative_percentage: Decimal::ZERO,
                    turnover_rate: ConsumptionCalculator::turnover_rate(
                        annual_consumption,
                        item.quantity,
                    ),
                    days_of_supply: ConsumptionCalculator::days_of_supply(
                        item.quantity,
                        annual_consumption,
                        config.no_depletion_days,
                    ),
                }
            })
            .collect();

        // Step 2: 依年耗用價值遞減排序，同值依品項ID遞增
        results.sort_by(Self::compare);

        // Step 3: 累計掃描（必須循序）
        Self::assign_classes(&mut results, config);

        tracing::debug!(
            "ABC 分析完成：{} 個品項，A {} / B {} / C {}",
            results.len(),
            results.iter().filter(|r| r.abc_class == AbcClass::A).count(),
            results.iter().filter(|r| r.abc_class == AbcClass::B).count(),
            results.iter().filter(|r| r.abc_class == AbcClass::C).count(),
        );

        results
    }

    /// 依累計百分比判定分類
    pub fn class_for(cumulative_percentage: Decimal, config: &AnalysisConfig) -> AbcClass {
        if cumulative_percentage <= config.abc_a_threshold {
            AbcClass::A
        } else if cumulative_percentage <= config.abc_b_threshold {
            AbcClass::B
        } else {
            AbcClass::C
        }
    }

    fn compare(a: &AbcResult, b: &AbcResult) -> Ordering {
        b.annual_value
            .cmp(&a.annual_value)
            .then_with(|| a.item_id.cmp(&b.item_id))
    }

    /// 累計掃描並分類
    ///
    /// 排名第一且有耗用價值的品項一律為 A 類，即使其單獨佔比已超過 A 類門檻。
    fn assign_classes(sorted: &mut [AbcResult], config: &AnalysisConfig) {
        let total_value = numeric::saturating_sum(sorted.iter().map(|r| r.annual_value));
        let hundred = Decimal::ONE_HUNDRED;
        let mut cumulative_value = Decimal::ZERO;

        for (rank, result) in sorted.iter_mut().enumerate() {
            cumulative_value = cumulative_value.saturating_add(result.annual_value);

            if total_value.is_zero() {
                result.percentage_value = Decimal::ZERO;
                result.cumulative_percentage = Decimal::ZERO;
            } else {
                result.percentage_value = numeric::mul_saturating(
                    numeric::div_saturating(result.annual_value, total_value, "價值佔比"),
                    hundred,
                    "價值佔比",
                );
                result.cumulative_percentage = numeric::mul_saturating(
                    numeric::div_saturating(cumulative_value, total_value, "累計佔比"),
                    hundred,
                    "累計佔比",
                );
            }

            result.abc_class = if rank == 0 && result.annual_value > Decimal::ZERO {
                AbcClass::A
            } else {
                Self::class_for(result.cumulative_percentage, config)
            };
        }
    }
}
