//! 週轉分析

use invperf_core::{
    AnalysisConfig, AnalysisPeriod, InventoryItem, Movement, TurnoverClass, TurnoverResult,
};
use rayon::prelude::*;
use rust_decimal::Decimal;

use crate::consumption::{ConsumptionCalculator, ConsumptionProfile};

/// 週轉分類器
pub struct TurnoverClassifier;

impl TurnoverClassifier {
    /// 執行週轉分析（逐品項獨立，結果保持品項輸入順序）
    ///
    /// 平均庫存以現有庫存近似，未做期間加權平均。
    pub fn classify(
        items: &[InventoryItem],
        movements: &[Movement],
        period: AnalysisPeriod,
        config: &AnalysisConfig,
    ) -> Vec<TurnoverResult> {
        let profiles = ConsumptionCalculator::profiles(movements, period);
        let empty = ConsumptionProfile::default();

        let results: Vec<TurnoverResult> = items
            .par_iter()
            .map(|item| {
                let profile = profiles.get(&item.id).unwrap_or(&empty);
                let avg_inventory = item.quantity;
                let turnover_rate =
                    ConsumptionCalculator::turnover_rate(profile.annual_consumption, avg_inventory);

                TurnoverResult {
                    item_id: item.id.clone(),
                    part_code: item.part_code.clone(),
                    part_name: item.part_name.clone(),
                    total_value: item.total_value(),
                    avg_inventory,
                    annual_consumption: profile.annual_consumption,
                    turnover_rate,
                    days_of_supply: ConsumptionCalculator::days_of_supply(
                        avg_inventory,
                        profile.annual_consumption,
                        config.no_depletion_days,
                    ),
                    classification: Self::class_for(turnover_rate, config),
                    last_movement_at: profile.last_movement_at,
                }
            })
            .collect();

        tracing::debug!("週轉分析完成：{} 個品項", results.len());

        results
    }

    /// 依週轉率判定速度分類
    pub fn class_for(turnover_rate: Decimal, config: &AnalysisConfig) -> TurnoverClass {
        if turnover_rate >= config.fast_turnover {
            TurnoverClass::Fast
        } else if turnover_rate >= config.medium_turnover {
            TurnoverClass::Medium
        } else if turnover_rate >= config.slow_turnover {
            TurnoverClass::Slow
        } else {
            TurnoverClass::Dead
        }
    }
}
