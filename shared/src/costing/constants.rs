//! Business constants baked into the costing formulas.
//!
//! Changing any of these changes the mill's pricing policy, not the shape of
//! the engine, so they are compile-time values only.

use rust_decimal::Decimal;

/// 10% wastage / contraction allowance on every yarn line (1.10)
pub const WASTAGE_FACTOR: Decimal = Decimal::from_parts(110, 0, 0, false, 2);

/// English count to grams-per-1000-metres conversion for this yarn family (590.5)
pub const ENGLISH_COUNT_FACTOR: Decimal = Decimal::from_parts(5905, 0, 0, false, 1);

/// Per-metre add-on for each triggered finishing flag (0.50)
pub const FIXED_CHARGE_PER_FLAG: Decimal = Decimal::from_parts(50, 0, 0, false, 2);

/// Minimum selling price floor: production cost plus 15% (1.15)
pub const MINIMUM_MARKUP_FACTOR: Decimal = Decimal::from_parts(115, 0, 0, false, 2);

/// Grams per kilogram
pub const GRAMS_PER_KG: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

pub const PERCENT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Share assumed for a weft line that does not state one
pub const FULL_WEFT_SHARE: Decimal = PERCENT;

/// Upper bound on any numeric field entering the formulas
pub const MAX_FIELD_VALUE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Smallest non-zero yarn count the formulas accept (0.1)
pub const MIN_YARN_COUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Decimal places for currency figures
pub const CURRENCY_DP: u32 = 2;

/// Decimal places for GLM and yarn weights
pub const QUANTITY_DP: u32 = 4;
