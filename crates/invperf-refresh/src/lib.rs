//! # Inventory Performance Refresh
//!
//! 報表快取、髒標記與過期結果丟棄

pub mod dirty_tracking;
pub mod generation;
pub mod report_cache;

// Re-export 主要類型
pub use dirty_tracking::DirtyTracker;
pub use generation::{GenerationCounter, RefreshTicket};
pub use report_cache::{ApplyOutcome, ReportCache};
