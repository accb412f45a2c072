//! 採購單模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 採購單明細
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    /// 料號
    pub part_code: String,

    /// 訂購數量
    pub quantity: Decimal,

    /// 單價
    pub unit_price: Decimal,
}

impl PurchaseOrderLine {
    pub fn new(part_code: String, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            part_code,
            quantity,
            unit_price,
        }
    }

    /// 明細小計（超出數值範圍時為 `None`）
    pub fn subtotal(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.unit_price)
    }
}

/// 採購單整單費用（折扣、運費、稅率）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCharges {
    /// 整單折扣金額
    pub discount: Decimal,

    /// 運費
    pub shipping: Decimal,

    /// 稅率（例如 0.05 表示 5%）
    pub tax_rate: Decimal,
}

impl OrderCharges {
    /// 建構器模式：設置折扣
    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }

    /// 建構器模式：設置運費
    pub fn with_shipping(mut self, shipping: Decimal) -> Self {
        self.shipping = shipping;
        self
    }

    /// 建構器模式：設置稅率
    pub fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = tax_rate;
        self
    }
}
