//! 盤點明細模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lenient;

/// 已完成盤點的單筆明細
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountRecord {
    /// 盤點單ID
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub count_id: String,

    /// 品項ID
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub item_id: String,

    /// 實盤數量
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub counted_quantity: Decimal,

    /// 盤點單完成時間
    pub count_completed_at: DateTime<Utc>,
}

impl CountRecord {
    /// 創建新的盤點明細
    pub fn new(
        count_id: String,
        item_id: String,
        counted_quantity: Decimal,
        count_completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            count_id,
            item_id,
            counted_quantity,
            count_completed_at,
        }
    }
}
