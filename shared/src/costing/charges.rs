//! Charges aggregator: fixed finishing add-ons plus percentage charges

use rust_decimal::Decimal;

use super::constants::{FIXED_CHARGE_PER_FLAG, PERCENT};
use crate::models::{ChargeBreakdown, ChargesConfig, WarpLineSpec};
use crate::types::{saturating_div, saturating_mul};

pub struct ChargesAggregator;

impl ChargesAggregator {
    /// Triggered flags across the order and every warp line
    pub fn flag_count(charges: &ChargesConfig, warp_lines: &[WarpLineSpec]) -> usize {
        charges.flag_count() + warp_lines.iter().map(WarpLineSpec::flag_count).sum::<usize>()
    }

    /// `yarn_subtotal` is warp cost plus weft cost per metre, unrounded
    pub fn aggregate(
        charges: &ChargesConfig,
        warp_lines: &[WarpLineSpec],
        yarn_subtotal: Decimal,
    ) -> ChargeBreakdown {
        let charges = charges.sanitized();
        let flags = Decimal::from(Self::flag_count(&charges, warp_lines));

        ChargeBreakdown {
            fixed_charges: saturating_mul(FIXED_CHARGE_PER_FLAG, flags),
            job_rate_amount: Self::percentage_of(yarn_subtotal, charges.job_rate_percent),
            expenses_amount: Self::percentage_of(yarn_subtotal, charges.expenses_percent),
            brokerage_amount: Self::percentage_of(yarn_subtotal, charges.brokerage_percent),
        }
    }

    fn percentage_of(base: Decimal, percent: Decimal) -> Decimal {
        saturating_div(saturating_mul(base, percent), PERCENT)
    }
}
