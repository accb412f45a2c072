//! 採購單金額計算
//!
//! 整單折扣與運費依明細小計比例分攤到各明細，四捨五入到分，
//! 尾差由最後一筆有金額的明細吸收，確保分攤合計與整單金額完全一致。

use invperf_core::{
    numeric, ApprovalLevel, ApprovalPolicy, OrderCharges, PerfError, PurchaseOrderLine,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// 金額小數位數
const MONEY_DP: u32 = 2;

/// 單位成本小數位數
const UNIT_COST_DP: u32 = 4;

/// 明細分攤結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineAllocation {
    pub part_code: String,
    pub quantity: Decimal,
    pub subtotal: Decimal,
    pub discount_share: Decimal,
    pub shipping_share: Decimal,

    /// 到岸金額（小計 − 折扣 + 運費，不含稅）
    pub landed_total: Decimal,

    /// 到岸單位成本
    pub landed_unit_cost: Decimal,
}

/// 採購單金額彙總
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseOrderTotals {
    pub lines: Vec<LineAllocation>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub shipping: Decimal,
    pub taxable_amount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// 採購單計算器
pub struct PurchaseOrderCalculator;

impl PurchaseOrderCalculator {
    /// 計算採購單金額與分攤
    pub fn calculate(
        lines: &[PurchaseOrderLine],
        charges: &OrderCharges,
    ) -> invperf_core::Result<PurchaseOrderTotals> {
        Self::validate(lines, charges)?;

        let subtotals = lines
            .iter()
            .map(|l| {
                l.subtotal()
                    .map(Self::round_money)
                    .ok_or_else(|| Self::out_of_range(&format!("明細 {} 小計", l.part_code)))
            })
            .collect::<invperf_core::Result<Vec<Decimal>>>()?;
        let subtotal = subtotals
            .iter()
            .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(*s))
            .ok_or_else(|| Self::out_of_range("小計"))?;

        if charges.discount > subtotal {
            return Err(PerfError::InvalidOrder(format!(
                "折扣 {} 超過小計 {}",
                charges.discount, subtotal
            )));
        }

        let discount = Self::round_money(charges.discount);
        let shipping = Self::round_money(charges.shipping);
        let taxable_amount = subtotal
            .checked_add(shipping)
            .map(|gross| gross - discount)
            .ok_or_else(|| Self::out_of_range("應稅金額"))?;
        let tax = taxable_amount
            .checked_mul(charges.tax_rate)
            .map(Self::round_money)
            .ok_or_else(|| Self::out_of_range("稅額"))?;
        let total = taxable_amount
            .checked_add(tax)
            .ok_or_else(|| Self::out_of_range("總額"))?;

        let discount_shares = Self::allocate(discount, &subtotals);
        let shipping_shares = Self::allocate(shipping, &subtotals);

        let allocations = lines
            .iter()
            .zip(subtotals.iter())
            .zip(discount_shares.iter().zip(shipping_shares.iter()))
            .map(|((line, &line_subtotal), (&discount_share, &shipping_share))| {
                Self::landed_line(line, line_subtotal, discount_share, shipping_share)
            })
            .collect::<invperf_core::Result<Vec<LineAllocation>>>()?;

        tracing::debug!(
            "採購單計算：明細 {} 筆，小計 {}，總額 {}",
            lines.len(),
            subtotal,
            total
        );

        Ok(PurchaseOrderTotals {
            lines: allocations,
            subtotal,
            discount,
            shipping,
            taxable_amount,
            tax,
            total,
        })
    }

    /// 依權重比例分攤金額
    ///
    /// 權重總和為 0 時平均分攤。回傳的分攤額合計恆等於 `amount`。
    pub fn allocate(amount: Decimal, weights: &[Decimal]) -> Vec<Decimal> {
        if weights.is_empty() {
            return Vec::new();
        }

        let total_weight = numeric::saturating_sum(weights.iter().copied());
        let weights: Vec<Decimal> = if total_weight.is_zero() {
            vec![Decimal::ONE; weights.len()]
        } else {
            weights.to_vec()
        };
        let total_weight = numeric::saturating_sum(weights.iter().copied());

        let remainder_index = weights
            .iter()
            .rposition(|w| *w > Decimal::ZERO)
            .unwrap_or(weights.len() - 1);

        let mut shares: Vec<Decimal> = weights
            .iter()
            .map(|w| Self::round_money(amount * (*w / total_weight)))
            .collect();

        let others: Decimal = shares
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != remainder_index)
            .map(|(_, s)| *s)
            .sum();
        shares[remainder_index] = amount - others;

        shares
    }

    /// 取得採購單需要的核准層級
    pub fn required_approval<'a>(
        totals: &PurchaseOrderTotals,
        policy: &'a ApprovalPolicy,
    ) -> Option<&'a ApprovalLevel> {
        let level = policy.required_level(totals.total);
        if level.is_none() {
            tracing::warn!("採購單總額 {} 超過所有核准層級上限", totals.total);
        }
        level
    }

    fn validate(lines: &[PurchaseOrderLine], charges: &OrderCharges) -> invperf_core::Result<()> {
        for line in lines {
            if line.quantity < Decimal::ZERO || line.unit_price < Decimal::ZERO {
                return Err(PerfError::InvalidOrder(format!(
                    "明細 {} 數量或單價為負數",
                    line.part_code
                )));
            }
        }

        if charges.discount < Decimal::ZERO
            || charges.shipping < Decimal::ZERO
            || charges.tax_rate < Decimal::ZERO
        {
            return Err(PerfError::InvalidOrder("折扣、運費與稅率不可為負數".to_string()));
        }

        Ok(())
    }

    /// 單一明細的到岸金額與單位成本
    fn landed_line(
        line: &PurchaseOrderLine,
        subtotal: Decimal,
        discount_share: Decimal,
        shipping_share: Decimal,
    ) -> invperf_core::Result<LineAllocation> {
        // 各明細分攤不超過整單金額，整單已確認未溢位
        let landed_total = subtotal - discount_share + shipping_share;
        let landed_unit_cost = if line.quantity.is_zero() {
            Decimal::ZERO
        } else {
            landed_total
                .checked_div(line.quantity)
                .ok_or_else(|| Self::out_of_range(&format!("明細 {} 到岸單位成本", line.part_code)))?
                .round_dp_with_strategy(UNIT_COST_DP, RoundingStrategy::MidpointAwayFromZero)
        };

        Ok(LineAllocation {
            part_code: line.part_code.clone(),
            quantity: line.quantity,
            subtotal,
            discount_share,
            shipping_share,
            landed_total,
            landed_unit_cost,
        })
    }

    fn out_of_range(what: &str) -> PerfError {
        PerfError::InvalidOrder(format!("{}超出數值範圍", what))
    }

    fn round_money(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
    }
}
