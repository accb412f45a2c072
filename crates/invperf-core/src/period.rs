//! 分析期間

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PerfError;

/// 一年天數（年化基準）
pub const DAYS_PER_YEAR: u32 = 365;

/// 報表分析期間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnalysisPeriod {
    #[serde(rename = "30d")]
    Days30,
    #[serde(rename = "90d")]
    Days90,
    #[serde(rename = "180d")]
    Days180,
    #[serde(rename = "365d")]
    Days365,
}

impl AnalysisPeriod {
    /// 所有可選期間
    pub const ALL: [AnalysisPeriod; 4] = [
        AnalysisPeriod::Days30,
        AnalysisPeriod::Days90,
        AnalysisPeriod::Days180,
        AnalysisPeriod::Days365,
    ];

    /// 期間天數
    pub fn days(self) -> u32 {
        match self {
            AnalysisPeriod::Days30 => 30,
            AnalysisPeriod::Days90 => 90,
            AnalysisPeriod::Days180 => 180,
            AnalysisPeriod::Days365 => 365,
        }
    }

    /// 年化係數（365 / 期間天數）
    pub fn annual_factor(self) -> Decimal {
        Decimal::from(DAYS_PER_YEAR) / Decimal::from(self.days())
    }

    /// 分析視窗起點
    pub fn since(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.days()))
    }

    /// 由天數取得期間
    pub fn from_days(days: u32) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.days() == days)
            .ok_or_else(|| PerfError::InvalidPeriod(format!("{} 天", days)))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisPeriod::Days30 => "30d",
            AnalysisPeriod::Days90 => "90d",
            AnalysisPeriod::Days180 => "180d",
            AnalysisPeriod::Days365 => "365d",
        }
    }
}

impl Default for AnalysisPeriod {
    fn default() -> Self {
        AnalysisPeriod::Days90
    }
}

impl fmt::Display for AnalysisPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisPeriod {
    type Err = PerfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('d').unwrap_or(trimmed);
        let days: u32 = digits
            .parse()
            .map_err(|_| PerfError::InvalidPeriod(trimmed.to_string()))?;
        Self::from_days(days)
    }
}
