//! # Inventory Performance
//!
//! 再製造工廠的庫存績效分析：ABC 分類、週轉分類、盤點精確度與彙總指標。
//!
//! - [`model`]：資料模型、分析參數、資料來源介面
//! - [`calc`]：分析引擎、報表服務、CSV 匯出、採購單金額
//! - [`refresh`]：報表快取與刷新世代管理

pub use invperf_calc as calc;
pub use invperf_core as model;
pub use invperf_refresh as refresh;

pub use invperf_calc::{PerformanceCalculator, PerformanceReport, ReportService};
pub use invperf_core::{AnalysisConfig, AnalysisPeriod, PerfError, Result};
pub use invperf_refresh::ReportCache;
