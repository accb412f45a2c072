//! # Inventory Performance Core
//!
//! 庫存績效分析的核心資料模型與類型定義

pub mod config;
pub mod count;
pub mod item;
pub mod lenient;
pub mod movement;
pub mod numeric;
pub mod period;
pub mod purchase;
pub mod result;
pub mod source;

// Re-export 主要類型
pub use config::{AnalysisConfig, ApprovalLevel, ApprovalPolicy};
pub use count::CountRecord;
pub use item::InventoryItem;
pub use movement::{Movement, MovementType};
pub use period::AnalysisPeriod;
pub use purchase::{OrderCharges, PurchaseOrderLine};
pub use result::{
    AbcClass, AbcResult, AccuracyResult, ClassBreakdown, PerformanceMetrics, TurnoverClass,
    TurnoverResult,
};
pub use source::{InventoryDataSource, MemoryDataSource};

/// 庫存績效分析錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum PerfError {
    #[error("資料讀取失敗: {0}")]
    DataFetch(String),

    #[error("無效的分析期間: {0}")]
    InvalidPeriod(String),

    #[error("無效的分析配置: {0}")]
    InvalidConfig(String),

    #[error("無效的採購單: {0}")]
    InvalidOrder(String),

    #[error("匯出錯誤: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, PerfError>;
