//! Common types used across the costing engine
//!
//! Numeric form fields arrive half-filled as a matter of course, so every
//! payload number goes through the lenient coercion rules in [`lenient`]
//! instead of failing deserialization.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::costing::constants::{MAX_FIELD_VALUE, MIN_YARN_COUNT};

/// Decimal places used when a figure is placed into a costing result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Costs, prices, profit: 2 dp
    Currency,
    /// GLM and yarn weights: 4 dp
    Quantity,
}

impl Precision {
    pub fn decimal_places(&self) -> u32 {
        match self {
            Precision::Currency => crate::costing::constants::CURRENCY_DP,
            Precision::Quantity => crate::costing::constants::QUANTITY_DP,
        }
    }

    /// Round half away from zero and pin the scale, so `5` prints as `5.00`
    pub fn round(&self, value: Decimal) -> Decimal {
        let dp = self.decimal_places();
        let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(dp);
        rounded
    }
}

/// Shorthand for [`Precision::Currency`] rounding
pub fn round_currency(value: Decimal) -> Decimal {
    Precision::Currency.round(value)
}

/// Shorthand for [`Precision::Quantity`] rounding
pub fn round_quantity(value: Decimal) -> Decimal {
    Precision::Quantity.round(value)
}

/// Clamp a value into the non-negative domain the formulas expect
pub fn non_negative(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}

/// Clamp a field into the domain the formulas are defined over,
/// `0..=MAX_FIELD_VALUE`
pub fn bounded(value: Decimal) -> Decimal {
    non_negative(value).min(MAX_FIELD_VALUE)
}

/// A yarn count is either unset (zero) or at least `MIN_YARN_COUNT`
pub fn bounded_yarn_count(value: Decimal) -> Decimal {
    let value = bounded(value);
    if value > Decimal::ZERO && value < MIN_YARN_COUNT {
        MIN_YARN_COUNT
    } else {
        value
    }
}

fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// `a + b`, pinned to the representable range instead of panicking
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b)
        .unwrap_or_else(|| saturated(a.is_sign_negative()))
}

/// `a - b`, pinned to the representable range instead of panicking
pub fn saturating_sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b)
        .unwrap_or_else(|| saturated(a.is_sign_negative()))
}

/// `a × b`, pinned to the representable range instead of panicking
pub fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b)
        .unwrap_or_else(|| saturated(a.is_sign_negative() != b.is_sign_negative()))
}

/// `a ÷ b`; zero for a zero divisor, pinned to the representable range on
/// overflow
pub fn saturating_div(a: Decimal, b: Decimal) -> Decimal {
    if b.is_zero() {
        return Decimal::ZERO;
    }
    a.checked_div(b)
        .unwrap_or_else(|| saturated(a.is_sign_negative() != b.is_sign_negative()))
}

/// Saturating sum of an iterator of figures
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, saturating_add)
}

/// Parse a form-style numeric string. Accepts plain and scientific notation.
fn parse_decimal_str(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Coerce an arbitrary JSON value into a non-negative decimal.
///
/// Numbers and numeric strings pass through; null, blanks, booleans,
/// containers, unparseable text and negative values all become zero.
pub fn coerce_decimal(value: &Value) -> Decimal {
    coerce_optional_decimal(value).unwrap_or(Decimal::ZERO)
}

/// Like [`coerce_decimal`] but distinguishes "nothing usable" from zero.
pub fn coerce_optional_decimal(value: &Value) -> Option<Decimal> {
    let parsed = match value {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    };
    parsed.map(non_negative)
}

/// Coerce a checkbox-style value into a flag
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "on" | "yes"
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// serde `deserialize_with` adapters implementing the coercion policy
pub mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::{coerce_decimal, coerce_flag, coerce_optional_decimal};

    pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_decimal(&value))
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_flag(&value))
    }

    /// A field that may legitimately be absent: `None` when missing, null,
    /// blank or garbage; otherwise the coerced value.
    pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_optional_decimal(&value))
    }

    /// A price the caller may not have chosen yet; zero counts as unset.
    pub fn optional_price<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_optional_decimal(&value).filter(|price| *price > Decimal::ZERO))
    }

    /// Weft share: blank means "the whole weft", anything else is coerced.
    pub fn share_percent<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let blank = match &value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if blank {
            Ok(crate::costing::constants::FULL_WEFT_SHARE)
        } else {
            Ok(coerce_decimal(&value))
        }
    }
}
