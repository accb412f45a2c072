//! 庫存品項模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{lenient, numeric};

/// 庫存品項（單一備品料號）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    /// 品項ID
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub id: String,

    /// 料號
    #[serde(default)]
    pub part_code: String,

    /// 品名
    #[serde(default)]
    pub part_name: String,

    /// 現有庫存
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub quantity: Decimal,

    /// 單位成本
    #[serde(default, deserialize_with = "lenient::decimal_or_zero")]
    pub unit_cost: Decimal,
}

impl InventoryItem {
    /// 創建新的庫存品項
    pub fn new(id: String, quantity: Decimal, unit_cost: Decimal) -> Self {
        Self {
            id,
            part_code: String::new(),
            part_name: String::new(),
            quantity,
            unit_cost,
        }
    }

    /// 建構器模式：設置料號
    pub fn with_part_code(mut self, part_code: String) -> Self {
        self.part_code = part_code;
        self
    }

    /// 建構器模式：設置品名
    pub fn with_part_name(mut self, part_name: String) -> Self {
        self.part_name = part_name;
        self
    }

    /// 庫存總值（現有數量 × 單位成本），超出數值範圍時以 0 計
    pub fn total_value(&self) -> Decimal {
        numeric::mul_or(self.quantity, self.unit_cost, Decimal::ZERO, "庫存總值")
    }

    /// 庫存總值是否超出數值範圍
    pub fn value_overflows(&self) -> bool {
        self.quantity.checked_mul(self.unit_cost).is_none()
    }

    /// 是否有庫存
    pub fn is_in_stock(&self) -> bool {
        self.quantity > Decimal::ZERO
    }
}
