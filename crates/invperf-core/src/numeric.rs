//! 溢位保護的數值運算
//!
//! 寬鬆反序列化會接受接近 `Decimal::MAX` 的數值，直接用運算子相乘或相除可能溢位。
//! 溢位時記錄警告並改用替代值，單一髒資料不會中斷整份報表。

use rust_decimal::Decimal;

/// 乘法，溢位時回傳 `fallback`
pub fn mul_or(a: Decimal, b: Decimal, fallback: Decimal, context: &str) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| {
        tracing::warn!("{}溢位（{} × {}），改用 {}", context, a, b, fallback);
        fallback
    })
}

/// 乘法，溢位時依正負號飽和到 `Decimal::MAX` / `Decimal::MIN`
pub fn mul_saturating(a: Decimal, b: Decimal, context: &str) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| {
        tracing::warn!("{}溢位（{} × {}），以極值計", context, a, b);
        a.saturating_mul(b)
    })
}

/// 除法，商溢位時依正負號飽和；除數為 0 時回傳 0
pub fn div_saturating(a: Decimal, b: Decimal, context: &str) -> Decimal {
    if b.is_zero() {
        return Decimal::ZERO;
    }
    a.checked_div(b).unwrap_or_else(|| {
        tracing::warn!("{}溢位（{} ÷ {}），以極值計", context, a, b);
        if a.is_sign_negative() != b.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// 飽和加總
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}
