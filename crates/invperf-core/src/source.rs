//! 資料來源介面
//!
//! 報表計算本身不做 I/O，三組輸入資料由外部資料來源提供。

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::{CountRecord, InventoryItem, Movement};

/// 庫存資料來源
pub trait InventoryDataSource: Send + Sync {
    /// 讀取組織的所有庫存品項
    fn fetch_inventory_items(&self, org_id: &str) -> crate::Result<Vec<InventoryItem>>;

    /// 讀取 `since` 之後的庫存異動
    fn fetch_movements(&self, org_id: &str, since: DateTime<Utc>) -> crate::Result<Vec<Movement>>;

    /// 讀取最近 `limit` 張已完成盤點單的明細（依完成時間由新到舊）
    fn fetch_recent_completed_counts(
        &self,
        org_id: &str,
        limit: usize,
    ) -> crate::Result<Vec<CountRecord>>;
}

/// 單一組織的資料集
#[derive(Debug, Clone, Default)]
struct OrgDataset {
    items: Vec<InventoryItem>,
    movements: Vec<Movement>,
    counts: Vec<CountRecord>,
}

/// 記憶體資料來源（測試與示範用）
#[derive(Debug, Clone, Default)]
pub struct MemoryDataSource {
    orgs: HashMap<String, OrgDataset>,
}

impl MemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置品項
    pub fn with_items(mut self, org_id: &str, items: Vec<InventoryItem>) -> Self {
        self.dataset_mut(org_id).items = items;
        self
    }

    /// 建構器模式：設置異動
    pub fn with_movements(mut self, org_id: &str, movements: Vec<Movement>) -> Self {
        self.dataset_mut(org_id).movements = movements;
        self
    }

    /// 建構器模式：設置盤點明細
    pub fn with_counts(mut self, org_id: &str, counts: Vec<CountRecord>) -> Self {
        self.dataset_mut(org_id).counts = counts;
        self
    }

    /// 追加一筆異動
    pub fn push_movement(&mut self, org_id: &str, movement: Movement) {
        self.dataset_mut(org_id).movements.push(movement);
    }

    fn dataset_mut(&mut self, org_id: &str) -> &mut OrgDataset {
        self.orgs.entry(org_id.to_string()).or_default()
    }
}

impl InventoryDataSource for MemoryDataSource {
    fn fetch_inventory_items(&self, org_id: &str) -> crate::Result<Vec<InventoryItem>> {
        Ok(self
            .orgs
            .get(org_id)
            .map(|d| d.items.clone())
            .unwrap_or_default())
    }

    fn fetch_movements(&self, org_id: &str, since: DateTime<Utc>) -> crate::Result<Vec<Movement>> {
        Ok(self
            .orgs
            .get(org_id)
            .map(|d| {
                d.movements
                    .iter()
                    .filter(|m| m.created_at >= since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn fetch_recent_completed_counts(
        &self,
        org_id: &str,
        limit: usize,
    ) -> crate::Result<Vec<CountRecord>> {
        let Some(dataset) = self.orgs.get(org_id) else {
            return Ok(Vec::new());
        };

        // 每張盤點單的完成時間
        let mut completed: HashMap<&str, DateTime<Utc>> = HashMap::new();
        for line in &dataset.counts {
            completed
                .entry(line.count_id.as_str())
                .or_insert(line.count_completed_at);
        }

        let mut recent: Vec<(&str, DateTime<Utc>)> = completed.into_iter().collect();
        recent.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        recent.truncate(limit);

        let kept: Vec<&str> = recent.iter().map(|(id, _)| *id).collect();
        let mut lines: Vec<CountRecord> = dataset
            .counts
            .iter()
            .filter(|line| kept.contains(&line.count_id.as_str()))
            .cloned()
            .collect();
        lines.sort_by(|a, b| b.count_completed_at.cmp(&a.count_completed_at));

        Ok(lines)
    }
}
