//! Weft line calculator

use rust_decimal::Decimal;

use super::constants::{ENGLISH_COUNT_FACTOR, GRAMS_PER_KG, PERCENT, WASTAGE_FACTOR};
use crate::models::{LineCosting, WeftLineSpec};
use crate::types::{bounded, saturating_div, saturating_mul};

/// Converts one weft yarn specification into unrounded per-line figures
pub struct WeftLineCalculator;

impl WeftLineCalculator {
    /// Grams per linear metre; zero when the yarn count is not set
    pub fn glm(spec: &WeftLineSpec) -> Decimal {
        if spec.yarn_count <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let insertions = [spec.picks_per_inch, spec.insertions_per_pick, WASTAGE_FACTOR]
            .into_iter()
            .fold(spec.reed_space, saturating_mul);
        saturating_div(insertions, saturating_mul(spec.yarn_count, ENGLISH_COUNT_FACTOR))
    }

    pub fn calculate(spec: &WeftLineSpec, order_length: Decimal) -> LineCosting {
        let spec = spec.sanitized();
        let glm = Self::glm(&spec);

        LineCosting {
            glm,
            cost_per_metre: saturating_mul(glm, spec.yarn_rate),
            // Only this line's share of the insertions draws on its yarn
            yarn_required_kg: saturating_div(
                saturating_mul(saturating_mul(glm, bounded(order_length)), spec.weft_share_percent),
                GRAMS_PER_KG * PERCENT,
            ),
        }
    }
}
