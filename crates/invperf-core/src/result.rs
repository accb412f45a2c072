//! 分析結果模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// ABC 分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbcClass {
    /// 高價值（累計價值前 80%）
    A,
    /// 中價值
    B,
    /// 低價值
    C,
}

impl AbcClass {
    pub const ALL: [AbcClass; 3] = [AbcClass::A, AbcClass::B, AbcClass::C];
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AbcClass::A => "A",
            AbcClass::B => "B",
            AbcClass::C => "C",
        };
        f.write_str(s)
    }
}

/// 週轉速度分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TurnoverClass {
    /// 快速週轉
    Fast,
    /// 中速週轉
    Medium,
    /// 慢速週轉
    Slow,
    /// 呆滯
    Dead,
}

impl TurnoverClass {
    pub const ALL: [TurnoverClass; 4] = [
        TurnoverClass::Fast,
        TurnoverClass::Medium,
        TurnoverClass::Slow,
        TurnoverClass::Dead,
    ];
}

impl fmt::Display for TurnoverClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TurnoverClass::Fast => "Fast",
            TurnoverClass::Medium => "Medium",
            TurnoverClass::Slow => "Slow",
            TurnoverClass::Dead => "Dead",
        };
        f.write_str(s)
    }
}

/// ABC 分析結果（單一品項）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbcResult {
    pub item_id: String,
    pub part_code: String,
    pub part_name: String,
    pub quantity: Decimal,
    pub unit_cost: Decimal,

    /// 庫存總值（現有數量 × 單位成本）
    pub total_value: Decimal,

    /// 年化耗用量
    pub annual_consumption: Decimal,

    /// 年耗用價值
    pub annual_value: Decimal,

    pub abc_class: AbcClass,

    /// 佔總年耗用價值百分比
    pub percentage_value: Decimal,

    /// 依年耗用價值遞減排序後的累計百分比
    pub cumulative_percentage: Decimal,

    pub turnover_rate: Decimal,
    pub days_of_supply: Decimal,
}

/// 週轉分析結果（單一品項）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnoverResult {
    pub item_id: String,
    pub part_code: String,
    pub part_name: String,
    pub total_value: Decimal,

    /// 平均庫存（以現有庫存近似）
    pub avg_inventory: Decimal,

    pub annual_consumption: Decimal,
    pub turnover_rate: Decimal,
    pub days_of_supply: Decimal,
    pub classification: TurnoverClass,

    /// 期間內最後一次異動時間
    pub last_movement_at: Option<DateTime<Utc>>,
}

/// 庫存精確度結果（單一品項）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracyResult {
    pub item_id: String,
    pub part_code: String,
    pub part_name: String,
    pub unit_cost: Decimal,

    /// 系統帳面數量
    pub system_quantity: Decimal,

    /// 實盤數量（無盤點紀錄時等於帳面數量）
    pub physical_quantity: Decimal,

    /// 差異數量（實盤 − 帳面）
    pub variance: Decimal,
    pub variance_percentage: Decimal,
    pub variance_value: Decimal,

    /// 精確度分數 [0, 100]
    pub accuracy_score: Decimal,

    /// 採用的盤點完成時間
    pub last_counted_at: Option<DateTime<Utc>>,
}

impl AccuracyResult {
    /// 是否有盤點紀錄佐證
    pub fn was_counted(&self) -> bool {
        self.last_counted_at.is_some()
    }
}

/// 分類統計（品項數與庫存價值）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBreakdown {
    pub count: usize,
    pub value: Decimal,
}

impl ClassBreakdown {
    pub fn add(&mut self, value: Decimal) {
        self.count += 1;
        self.value = self.value.saturating_add(value);
    }
}

/// 庫存績效彙總指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_items: usize,
    pub total_value: Decimal,
    pub abc_distribution: BTreeMap<AbcClass, ClassBreakdown>,
    pub turnover_distribution: BTreeMap<TurnoverClass, ClassBreakdown>,
    pub average_accuracy: Decimal,
    pub average_turnover: Decimal,
    pub dead_stock_value: Decimal,
    pub fast_moving_items: usize,
}

impl PerformanceMetrics {
    /// 創建空的彙總（所有分類皆存在且為 0）
    pub fn empty() -> Self {
        Self {
            total_items: 0,
            total_value: Decimal::ZERO,
            abc_distribution: AbcClass::ALL
                .into_iter()
                .map(|c| (c, ClassBreakdown::default()))
                .collect(),
            turnover_distribution: TurnoverClass::ALL
                .into_iter()
                .map(|c| (c, ClassBreakdown::default()))
                .collect(),
            average_accuracy: Decimal::ZERO,
            average_turnover: Decimal::ZERO,
            dead_stock_value: Decimal::ZERO,
            fast_moving_items: 0,
        }
    }

    /// 取得 ABC 分類統計
    pub fn abc(&self, class: AbcClass) -> ClassBreakdown {
        self.abc_distribution.get(&class).copied().unwrap_or_default()
    }

    /// 取得週轉分類統計
    pub fn turnover(&self, class: TurnoverClass) -> ClassBreakdown {
        self.turnover_distribution
            .get(&class)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics_has_all_classes() {
        let metrics = PerformanceMetrics::empty();

        assert_eq!(metrics.abc_distribution.len(), 3);
        assert_eq!(metrics.turnover_distribution.len(), 4);
        assert_eq!(metrics.abc(AbcClass::B).count, 0);
        assert_eq!(metrics.turnover(TurnoverClass::Dead).value, Decimal::ZERO);
    }

    #[test]
    fn test_class_breakdown_add() {
        let mut breakdown = ClassBreakdown::default();
        breakdown.add(Decimal::from(150));
        breakdown.add(Decimal::from(50));

        assert_eq!(breakdown.count, 2);
        assert_eq!(breakdown.value, Decimal::from(200));
    }

    #[test]
    fn test_metrics_json_keys() {
        let json = serde_json::to_value(PerformanceMetrics::empty()).unwrap();
        assert!(json["abc_distribution"].get("A").is_some());
        assert!(json["turnover_distribution"].get("Dead").is_some());
    }
}
