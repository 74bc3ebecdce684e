//! Warp line calculator

use rust_decimal::Decimal;

use super::constants::{ENGLISH_COUNT_FACTOR, GRAMS_PER_KG, WASTAGE_FACTOR};
use crate::models::{LineCosting, WarpLineSpec};
use crate::types::{bounded, saturating_add, saturating_div, saturating_mul};

/// Converts one warp yarn specification into unrounded per-line figures
pub struct WarpLineCalculator;

impl WarpLineCalculator {
    /// Ends across the full reed: `(width + reedGap) × reedCount`
    pub fn total_ends(spec: &WarpLineSpec) -> Decimal {
        saturating_mul(saturating_add(spec.width, spec.reed_gap), spec.reed_count)
    }

    /// Grams per linear metre; zero when the yarn count is not set
    pub fn glm(spec: &WarpLineSpec) -> Decimal {
        if spec.yarn_count <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        saturating_div(
            saturating_mul(Self::total_ends(spec), WASTAGE_FACTOR),
            saturating_mul(spec.yarn_count, ENGLISH_COUNT_FACTOR),
        )
    }

    pub fn calculate(spec: &WarpLineSpec, order_length: Decimal) -> LineCosting {
        let spec = spec.sanitized();
        let glm = Self::glm(&spec);

        LineCosting {
            glm,
            cost_per_metre: saturating_add(saturating_mul(glm, spec.yarn_rate), spec.sizing_rate),
            yarn_required_kg: saturating_div(saturating_mul(glm, bounded(order_length)), GRAMS_PER_KG),
        }
    }
}
