//! # Inventory Performance Calculation Engine
//!
//! 庫存績效報表計算引擎（ABC、週轉、精確度、彙總）

pub mod abc;
pub mod accuracy;
pub mod calculator;
pub mod consumption;
pub mod export;
pub mod metrics;
pub mod purchasing;
pub mod service;
pub mod turnover;

// Re-export 主要類型
pub use abc::AbcClassifier;
pub use accuracy::AccuracyAnalyzer;
pub use calculator::PerformanceCalculator;
pub use export::CsvExporter;
pub use metrics::MetricsAggregator;
pub use purchasing::{PurchaseOrderCalculator, PurchaseOrderTotals};
pub use service::ReportService;
pub use turnover::TurnoverClassifier;

use chrono::{DateTime, Utc};
use invperf_core::{AbcResult, AccuracyResult, AnalysisPeriod, PerformanceMetrics, TurnoverResult};
use uuid::Uuid;

/// 庫存績效報表
#[derive(Debug, Clone)]
pub struct PerformanceReport {
    /// 報表ID
    pub id: Uuid,

    /// 分析期間
    pub period: AnalysisPeriod,

    /// 產生時間
    pub generated_at: DateTime<Utc>,

    /// ABC 分析（依年耗用價值遞減排序）
    pub abc: Vec<AbcResult>,

    /// 週轉分析（依品項輸入順序）
    pub turnover: Vec<TurnoverResult>,

    /// 精確度分析（依品項輸入順序）
    pub accuracy: Vec<AccuracyResult>,

    /// 彙總指標
    pub metrics: PerformanceMetrics,

    /// 資料品質提示
    pub warnings: Vec<ReportWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PerformanceReport {
    /// 創建空的報表
    pub fn empty(period: AnalysisPeriod, generated_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            period,
            generated_at,
            abc: Vec::new(),
            turnover: Vec::new(),
            accuracy: Vec::new(),
            metrics: PerformanceMetrics::empty(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ReportWarning) {
        self.warnings.push(warning);
    }
}

/// 報表警告
#[derive(Debug, Clone)]
pub struct ReportWarning {
    pub item_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl ReportWarning {
    pub fn new(item_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            item_id,
            message,
            severity,
        }
    }

    pub fn info(item_id: String, message: String) -> Self {
        Self::new(item_id, message, WarningSeverity::Info)
    }

    pub fn warning(item_id: String, message: String) -> Self {
        Self::new(item_id, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
}
