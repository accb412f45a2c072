//! 庫存異動模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// 異動方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// 入庫
    In,
    /// 出庫（耗用）
    Out,
}

/// 庫存異動（不可變的歷史紀錄）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    /// 品項ID
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub item_id: String,

    /// 異動方向
    pub movement_type: MovementType,

    /// 異動數量（正數）
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub quantity: Decimal,

    /// 異動時間
    pub created_at: DateTime<Utc>,
}

impl Movement {
    /// 創建新的異動紀錄
    pub fn new(
        item_id: String,
        movement_type: MovementType,
        quantity: Decimal,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id,
            movement_type,
            quantity,
            created_at,
        }
    }

    /// 入庫異動
    pub fn inbound(item_id: String, quantity: Decimal, created_at: DateTime<Utc>) -> Self {
        Self::new(item_id, MovementType::In, quantity, created_at)
    }

    /// 出庫異動
    pub fn outbound(item_id: String, quantity: Decimal, created_at: DateTime<Utc>) -> Self {
        Self::new(item_id, MovementType::Out, quantity, created_at)
    }

    /// 檢查是否為出庫
    pub fn is_outbound(&self) -> bool {
        self.movement_type == MovementType::Out
    }
}
