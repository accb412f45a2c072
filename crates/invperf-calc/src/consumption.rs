//! 耗用量年化

use chrono::{DateTime, Utc};
use invperf_core::{AnalysisPeriod, Movement};
use rust_decimal::Decimal;
use std::collections::HashMap;

use invperf_core::numeric;
use invperf_core::period::DAYS_PER_YEAR;

/// 單一品項在分析期間內的異動概況
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsumptionProfile {
    /// 期間出庫量
    pub period_consumption: Decimal,
    /// 年化出庫量
    pub annual_consumption: Decimal,
    /// 最後一次異動時間（含入庫）
    pub last_movement_at: Option<DateTime<Utc>>,
}

/// 耗用量計算器
pub struct ConsumptionCalculator;

impl ConsumptionCalculator {
    /// 按品項彙整異動
    pub fn profiles(
        movements: &[Movement],
        period: AnalysisPeriod,
    ) -> HashMap<String, ConsumptionProfile> {
        let mut profiles: HashMap<String, ConsumptionProfile> = HashMap::new();

        for movement in movements {
            let profile = profiles.entry(movement.item_id.clone()).or_default();

            if movement.is_outbound() {
                profile.period_consumption =
                    profile.period_consumption.saturating_add(movement.quantity);
            }

            profile.last_movement_at = match profile.last_movement_at {
                Some(last) if last >= movement.created_at => Some(last),
                _ => Some(movement.created_at),
            };
        }

        let annual_factor = period.annual_factor();
        for profile in profiles.values_mut() {
            profile.annual_consumption = Self::annualize(profile.period_consumption, annual_factor);
        }

        profiles
    }

    /// 期間耗用量 × 年化係數
    pub fn annualize(period_consumption: Decimal, annual_factor: Decimal) -> Decimal {
        if annual_factor == Decimal::ONE {
            return period_consumption;
        }
        numeric::mul_saturating(period_consumption, annual_factor, "年化耗用量")
    }

    /// 週轉率 = 年耗用量 / 庫存（庫存為 0 時為 0）
    pub fn turnover_rate(annual_consumption: Decimal, inventory: Decimal) -> Decimal {
        numeric::div_saturating(annual_consumption, inventory, "週轉率")
    }

    /// 供應天數 = 庫存 / 年耗用量 × 365（無耗用時回傳標記值）
    pub fn days_of_supply(
        inventory: Decimal,
        annual_consumption: Decimal,
        no_depletion_days: Decimal,
    ) -> Decimal {
        if annual_consumption <= Decimal::ZERO {
            return no_depletion_days;
        }

        inventory
            .checked_div(annual_consumption)
            .and_then(|years| years.checked_mul(Decimal::from(DAYS_PER_YEAR)))
            .unwrap_or_else(|| {
                tracing::warn!(
                    "供應天數溢位（庫存 {}，年耗用 {}），改用 {}",
                    inventory,
                    annual_consumption,
                    no_depletion_days
                );
                no_depletion_days
            })
    }
}
