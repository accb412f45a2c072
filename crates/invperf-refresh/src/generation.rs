//! 刷新世代計數
//!
//! 每次觸發刷新都會取得一張票；結果回來時只有最新的票仍有效。
//! 不取消進行中的讀取，只在套用結果時比對世代。

use invperf_core::AnalysisPeriod;
use std::sync::atomic::{AtomicU64, Ordering};

/// 刷新票據
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    pub period: AnalysisPeriod,
    pub generation: u64,
}

/// 單調遞增的世代計數器
#[derive(Debug, Default)]
pub struct GenerationCounter {
    latest: AtomicU64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 開始新的刷新，先前發出的票全部過期
    pub fn begin(&self, period: AnalysisPeriod) -> RefreshTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RefreshTicket { period, generation }
    }

    /// 票據是否仍為最新
    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.generation
    }

    /// 目前世代
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
