//! Costing engine payloads: the input recipe and the derived snapshot

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ChargesConfig, WarpLineSpec, WeftLineSpec};
use crate::types::{bounded, lenient, round_currency, round_quantity, saturating_add, saturating_sum};

/// Everything the engine reads for one order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostingInput {
    /// Target fabric length in metres
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub order_length: Decimal,
    #[serde(default)]
    pub warp_lines: Vec<WarpLineSpec>,
    #[serde(default)]
    pub weft_lines: Vec<WeftLineSpec>,
    #[serde(default)]
    pub charges: ChargesConfig,
}

impl CostingInput {
    pub fn sanitized(&self) -> Self {
        Self {
            order_length: bounded(self.order_length),
            warp_lines: self.warp_lines.iter().map(WarpLineSpec::sanitized).collect(),
            weft_lines: self.weft_lines.iter().map(WeftLineSpec::sanitized).collect(),
            charges: self.charges.sanitized(),
        }
    }

    /// Parse a form payload, applying the lenient numeric rules
    pub fn from_json(payload: &str) -> Result<Self, crate::error::CostingError> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Per-line figures produced by the warp and weft calculators
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineCosting {
    /// Grams per linear metre
    pub glm: Decimal,
    pub cost_per_metre: Decimal,
    pub yarn_required_kg: Decimal,
}

impl LineCosting {
    /// Settle the figures at output precision
    pub fn rounded(&self) -> Self {
        Self {
            glm: round_quantity(self.glm),
            cost_per_metre: round_currency(self.cost_per_metre),
            yarn_required_kg: round_quantity(self.yarn_required_kg),
        }
    }
}

impl std::ops::Add for LineCosting {
    type Output = LineCosting;

    fn add(self, other: LineCosting) -> LineCosting {
        LineCosting {
            glm: saturating_add(self.glm, other.glm),
            cost_per_metre: saturating_add(self.cost_per_metre, other.cost_per_metre),
            yarn_required_kg: saturating_add(self.yarn_required_kg, other.yarn_required_kg),
        }
    }
}

impl std::iter::Sum for LineCosting {
    fn sum<I: Iterator<Item = LineCosting>>(iter: I) -> Self {
        iter.fold(LineCosting::default(), |acc, line| acc + line)
    }
}

/// Output of the charges aggregator, per metre
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChargeBreakdown {
    /// Flat finishing add-ons (monogram, butta, top beam, bobin)
    pub fixed_charges: Decimal,
    pub job_rate_amount: Decimal,
    pub expenses_amount: Decimal,
    pub brokerage_amount: Decimal,
}

impl ChargeBreakdown {
    pub fn total(&self) -> Decimal {
        saturating_sum([
            self.fixed_charges,
            self.job_rate_amount,
            self.expenses_amount,
            self.brokerage_amount,
        ])
    }
}

/// The full derived snapshot for one order.
///
/// Currency fields carry 2 decimal places and GLM/yarn fields 4. A result
/// has no identity of its own: it is recomputed whenever any contributing
/// input changes, never patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CostingResult {
    pub warp_lines: Vec<LineCosting>,
    pub weft_lines: Vec<LineCosting>,

    pub warp_cost_per_metre: Decimal,
    pub weft_cost_per_metre: Decimal,
    pub yarn_cost_per_metre: Decimal,

    pub warp_glm: Decimal,
    pub weft_glm: Decimal,
    pub total_glm: Decimal,

    pub warp_yarn_required_kg: Decimal,
    pub weft_yarn_required_kg: Decimal,
    pub total_yarn_required_kg: Decimal,

    /// Sum of fixed per-flag add-ons
    pub additional_charges: Decimal,
    pub job_rate_amount: Decimal,
    pub expenses_amount: Decimal,
    pub brokerage_amount: Decimal,

    pub production_cost_per_metre: Decimal,
    pub minimum_selling_price_per_metre: Decimal,
    pub selling_price_per_metre: Decimal,
    /// True when no caller price was set and the minimum was substituted
    pub selling_price_defaulted: bool,
    pub net_profit_per_metre: Decimal,
    pub profit_percent: Decimal,

    pub total_warp_cost: Decimal,
    pub total_weft_cost: Decimal,
    pub total_production_cost: Decimal,
    pub total_net_profit: Decimal,
}
