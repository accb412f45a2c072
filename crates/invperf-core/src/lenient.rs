//! 寬鬆欄位解析
//!
//! 外部資料庫回傳的數值欄位可能是數字、字串或 null。
//! 無法解析的數值一律視為 0，讓報表在資料不乾淨時仍可產出。

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// serde `deserialize_with`：數值或數字字串 → Decimal，其餘 → 0
pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_decimal(&value))
}

/// serde `deserialize_with`：字串或數字 → String（ID 欄位可能是整數主鍵）
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// 將任意 JSON 值轉為 Decimal
pub fn coerce_decimal(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string())
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Value::String(s) => parse_decimal(s),
        Value::Null => return Decimal::ZERO,
        _ => None,
    };

    match parsed {
        Some(d) => d,
        None => {
            tracing::warn!("無法解析的數值 {}，以 0 代替", value);
            Decimal::ZERO
        }
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}
