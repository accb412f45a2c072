//! 分析配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PerfError;

/// 庫存績效分析參數
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// A 類累計價值上限（%）
    pub abc_a_threshold: Decimal,

    /// B 類累計價值上限（%）
    pub abc_b_threshold: Decimal,

    /// 快速週轉門檻（年週轉次數）
    pub fast_turnover: Decimal,

    /// 中速週轉門檻
    pub medium_turnover: Decimal,

    /// 慢速週轉門檻，低於此值視為呆滯
    pub slow_turnover: Decimal,

    /// 無耗用時的供應天數標記值（表示近期不會耗盡）
    pub no_depletion_days: Decimal,

    /// 精確度分析採用的最近已完成盤點單數
    pub recent_count_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            abc_a_threshold: Decimal::from(80),
            abc_b_threshold: Decimal::from(95),
            fast_turnover: Decimal::from(12),
            medium_turnover: Decimal::from(4),
            slow_turnover: Decimal::ONE,
            no_depletion_days: Decimal::from(999),
            recent_count_limit: 10,
        }
    }
}

impl AnalysisConfig {
    /// 建構器模式：設置 ABC 門檻
    pub fn with_abc_thresholds(mut self, a: Decimal, b: Decimal) -> Self {
        self.abc_a_threshold = a;
        self.abc_b_threshold = b;
        self
    }

    /// 建構器模式：設置週轉率門檻
    pub fn with_turnover_thresholds(mut self, fast: Decimal, medium: Decimal, slow: Decimal) -> Self {
        self.fast_turnover = fast;
        self.medium_turnover = medium;
        self.slow_turnover = slow;
        self
    }

    /// 建構器模式：設置無耗用標記天數
    pub fn with_no_depletion_days(mut self, days: Decimal) -> Self {
        self.no_depletion_days = days;
        self
    }

    /// 建構器模式：設置盤點單數上限
    pub fn with_recent_count_limit(mut self, limit: usize) -> Self {
        self.recent_count_limit = limit;
        self
    }

    /// 從 JSON 載入，缺少的欄位採用預設值
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(json)
            .map_err(|e| PerfError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 檢查門檻設定是否合理
    pub fn validate(&self) -> crate::Result<()> {
        let hundred = Decimal::ONE_HUNDRED;

        if self.abc_a_threshold <= Decimal::ZERO
            || self.abc_a_threshold > self.abc_b_threshold
            || self.abc_b_threshold > hundred
        {
            return Err(PerfError::InvalidConfig(format!(
                "ABC 門檻須滿足 0 < A <= B <= 100：A={}, B={}",
                self.abc_a_threshold, self.abc_b_threshold
            )));
        }

        if self.slow_turnover < Decimal::ZERO
            || self.slow_turnover > self.medium_turnover
            || self.medium_turnover > self.fast_turnover
        {
            return Err(PerfError::InvalidConfig(format!(
                "週轉門檻須遞增：慢 {}, 中 {}, 快 {}",
                self.slow_turnover, self.medium_turnover, self.fast_turnover
            )));
        }

        if self.recent_count_limit == 0 {
            return Err(PerfError::InvalidConfig("盤點單數上限不可為 0".to_string()));
        }

        Ok(())
    }
}

/// 採購單核准層級
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalLevel {
    /// 核准角色
    pub role: String,

    /// 可核准金額上限（None 表示無上限）
    pub max_amount: Option<Decimal>,
}

impl ApprovalLevel {
    pub fn new(role: String, max_amount: Option<Decimal>) -> Self {
        Self { role, max_amount }
    }

    /// 此層級是否可核准該金額
    pub fn covers(&self, amount: Decimal) -> bool {
        self.max_amount.map_or(true, |max| amount <= max)
    }
}

/// 採購核准門檻政策
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApprovalPolicy {
    levels: Vec<ApprovalLevel>,
}

impl ApprovalPolicy {
    /// 創建核准政策，層級依金額上限遞增排序（無上限者排最後）
    pub fn new(mut levels: Vec<ApprovalLevel>) -> Self {
        levels.sort_by(|a, b| match (a.max_amount, b.max_amount) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Self { levels }
    }

    /// 取得可核准該金額的最低層級
    pub fn required_level(&self, amount: Decimal) -> Option<&ApprovalLevel> {
        self.levels.iter().find(|level| level.covers(amount))
    }

    pub fn levels(&self) -> &[ApprovalLevel] {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();

        assert_eq!(config.abc_a_threshold, Decimal::from(80));
        assert_eq!(config.abc_b_threshold, Decimal::from(95));
        assert_eq!(config.fast_turnover, Decimal::from(12));
        assert_eq!(config.no_depletion_days, Decimal::from(999));
        assert_eq!(config.recent_count_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AnalysisConfig::default()
            .with_abc_thresholds(Decimal::from(70), Decimal::from(90))
            .with_recent_count_limit(5);

        assert_eq!(config.abc_a_threshold, Decimal::from(70));
        assert_eq!(config.recent_count_limit, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_thresholds() {
        let config = AnalysisConfig::default()
            .with_abc_thresholds(Decimal::from(96), Decimal::from(95));
        assert!(config.validate().is_err());

        let config = AnalysisConfig::default()
            .with_turnover_thresholds(Decimal::from(4), Decimal::from(12), Decimal::ONE);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_json_partial() {
        let config = AnalysisConfig::from_json(r#"{"recent_count_limit": 3}"#).unwrap();

        assert_eq!(config.recent_count_limit, 3);
        assert_eq!(config.abc_a_threshold, Decimal::from(80));

        assert!(AnalysisConfig::from_json(r#"{"recent_count_limit": 0}"#).is_err());
        assert!(AnalysisConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_approval_policy() {
        let policy = ApprovalPolicy::new(vec![
            ApprovalLevel::new("總經理".to_string(), None),
            ApprovalLevel::new("採購主管".to_string(), Some(Decimal::from(5000))),
            ApprovalLevel::new("採購專員".to_string(), Some(Decimal::from(1000))),
        ]);

        assert_eq!(policy.required_level(Decimal::from(800)).unwrap().role, "採購專員");
        assert_eq!(policy.required_level(Decimal::from(1000)).unwrap().role, "採購專員");
        assert_eq!(policy.required_level(Decimal::from(1001)).unwrap().role, "採購主管");
        assert_eq!(policy.required_level(Decimal::from(90000)).unwrap().role, "總經理");
    }

    #[test]
    fn test_approval_policy_without_unlimited_level() {
        let policy = ApprovalPolicy::new(vec![ApprovalLevel::new(
            "採購專員".to_string(),
            Some(Decimal::from(1000)),
        )]);

        assert!(policy.required_level(Decimal::from(1500)).is_none());
        assert!(ApprovalPolicy::default().required_level(Decimal::ONE).is_none());
    }
}
