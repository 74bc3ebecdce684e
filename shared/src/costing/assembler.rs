//! Production cost assembler and the engine entry point.
//!
//! Rounding policy: line figures and the charges are summed at full
//! precision. Each field is rounded once, when it is placed into the
//! result. The production cost is settled first and every price and total
//! downstream of it reads the settled per-metre figure, so the published
//! numbers reconcile with each other exactly.

use rust_decimal::Decimal;

use super::constants::{MINIMUM_MARKUP_FACTOR, PERCENT};
use super::{ChargesAggregator, WarpLineCalculator, WeftLineCalculator};
use crate::models::{ChargeBreakdown, CostingInput, CostingResult, LineCosting};
use crate::types::{
    bounded, round_currency, round_quantity, saturating_add, saturating_div, saturating_mul,
    saturating_sub, saturating_sum,
};

pub struct ProductionCostAssembler;

impl ProductionCostAssembler {
    /// Combine unrounded line and charge figures into a rounded snapshot
    pub fn assemble(
        warp_lines: &[LineCosting],
        weft_lines: &[LineCosting],
        charges: &ChargeBreakdown,
        order_length: Decimal,
        selling_price: Option<Decimal>,
    ) -> CostingResult {
        let order_length = bounded(order_length);
        let warp: LineCosting = warp_lines.iter().copied().sum();
        let weft: LineCosting = weft_lines.iter().copied().sum();
        let yarn_cost = saturating_add(warp.cost_per_metre, weft.cost_per_metre);

        let production_cost = round_currency(saturating_add(yarn_cost, charges.total()));
        let minimum_price = Self::minimum_selling_price(production_cost);

        let (selling_price, selling_price_defaulted) = match selling_price
            .map(|price| round_currency(bounded(price)))
            .filter(|price| *price > Decimal::ZERO)
        {
            Some(price) => (price, false),
            None => (minimum_price, true),
        };

        let net_profit = round_currency(saturating_sub(selling_price, production_cost));
        let profit_percent = Self::profit_percent(net_profit, production_cost);

        let warp_cost = round_currency(warp.cost_per_metre);
        let weft_cost = round_currency(weft.cost_per_metre);

        CostingResult {
            warp_lines: warp_lines.iter().map(LineCosting::rounded).collect(),
            weft_lines: weft_lines.iter().map(LineCosting::rounded).collect(),

            warp_cost_per_metre: warp_cost,
            weft_cost_per_metre: weft_cost,
            yarn_cost_per_metre: round_currency(yarn_cost),

            warp_glm: round_quantity(warp.glm),
            weft_glm: round_quantity(weft.glm),
            total_glm: round_quantity(saturating_add(warp.glm, weft.glm)),

            warp_yarn_required_kg: round_quantity(warp.yarn_required_kg),
            weft_yarn_required_kg: round_quantity(weft.yarn_required_kg),
            total_yarn_required_kg: round_quantity(saturating_add(
                warp.yarn_required_kg,
                weft.yarn_required_kg,
            )),

            additional_charges: round_currency(charges.fixed_charges),
            job_rate_amount: round_currency(charges.job_rate_amount),
            expenses_amount: round_currency(charges.expenses_amount),
            brokerage_amount: round_currency(charges.brokerage_amount),

            production_cost_per_metre: production_cost,
            minimum_selling_price_per_metre: minimum_price,
            selling_price_per_metre: selling_price,
            selling_price_defaulted,
            net_profit_per_metre: net_profit,
            profit_percent,

            total_warp_cost: round_currency(saturating_mul(warp_cost, order_length)),
            total_weft_cost: round_currency(saturating_mul(weft_cost, order_length)),
            total_production_cost: round_currency(saturating_mul(production_cost, order_length)),
            total_net_profit: round_currency(saturating_mul(net_profit, order_length)),
        }
    }

    /// Production cost plus the 15% floor, at currency precision
    pub fn minimum_selling_price(production_cost: Decimal) -> Decimal {
        round_currency(saturating_mul(production_cost, MINIMUM_MARKUP_FACTOR))
    }

    fn profit_percent(net_profit: Decimal, production_cost: Decimal) -> Decimal {
        if production_cost <= Decimal::ZERO {
            return round_currency(Decimal::ZERO);
        }
        round_currency(saturating_mul(saturating_div(net_profit, production_cost), PERCENT))
    }
}

/// Evaluate one order's recipe. Pure: same input, same digits, every time.
pub fn calculate_costing(input: &CostingInput) -> CostingResult {
    let input = input.sanitized();
    let order_length = input.order_length;

    let warp_lines: Vec<LineCosting> = input
        .warp_lines
        .iter()
        .map(|line| WarpLineCalculator::calculate(line, order_length))
        .collect();
    let weft_lines: Vec<LineCosting> = input
        .weft_lines
        .iter()
        .map(|line| WeftLineCalculator::calculate(line, order_length))
        .collect();

    let yarn_subtotal = saturating_sum(
        warp_lines
            .iter()
            .chain(weft_lines.iter())
            .map(|line| line.cost_per_metre),
    );
    let charges = ChargesAggregator::aggregate(&input.charges, &input.warp_lines, yarn_subtotal);

    ProductionCostAssembler::assemble(
        &warp_lines,
        &weft_lines,
        &charges,
        order_length,
        input.charges.selling_price,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costing::constants::{MAX_FIELD_VALUE, MIN_YARN_COUNT};
    use crate::models::{ChargesConfig, WarpLineSpec, WeftLineSpec};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_input() -> CostingInput {
        CostingInput {
            order_length: dec("100"),
            warp_lines: vec![WarpLineSpec {
                width: dec("150"),
                reed_gap: dec("2"),
                reed_count: dec("60"),
                yarn_count: dec("40"),
                yarn_rate: dec("250"),
                sizing_rate: dec("1.2"),
                ..Default::default()
            }],
            weft_lines: vec![WeftLineSpec {
                reed_space: dec("150"),
                picks_per_inch: dec("60"),
                insertions_per_pick: dec("1"),
                yarn_count: dec("40"),
                yarn_rate: dec("230"),
                weft_share_percent: dec("100"),
            }],
            charges: ChargesConfig::default(),
        }
    }

    #[test]
    fn test_combined_scenario_default_price() {
        let result = calculate_costing(&sample_input());

        assert_eq!(result.warp_cost_per_metre, dec("107.38"));
        assert_eq!(result.weft_cost_per_metre, dec("96.40"));
        assert_eq!(result.production_cost_per_metre, dec("203.78"));
        assert_eq!(result.minimum_selling_price_per_metre, dec("234.35"));
        assert!(result.selling_price_defaulted);
        assert_eq!(result.selling_price_per_metre, dec("234.35"));
        assert_eq!(result.net_profit_per_metre, dec("30.57"));
        assert_eq!(result.profit_percent, dec("15.00"));
    }

    #[test]
    fn test_combined_scenario_with_selling_price() {
        let mut input = sample_input();
        input.charges.selling_price = Some(dec("220"));
        let result = calculate_costing(&input);

        assert!(!result.selling_price_defaulted);
        assert_eq!(result.selling_price_per_metre, dec("220.00"));
        assert_eq!(result.net_profit_per_metre, dec("16.22"));
        assert_eq!(result.profit_percent, dec("7.96"));
    }

    #[test]
    fn test_glm_and_yarn_totals() {
        let result = calculate_costing(&sample_input());

        assert_eq!(result.warp_glm, dec("0.4247"));
        assert_eq!(result.weft_glm, dec("0.4191"));
        // Summed before rounding: 0.42472 + 0.41914 = 0.84386
        assert_eq!(result.total_glm, dec("0.8439"));
        assert_eq!(result.warp_yarn_required_kg, dec("0.0425"));
        assert_eq!(result.weft_yarn_required_kg, dec("0.0419"));
        assert_eq!(result.total_yarn_required_kg, dec("0.0844"));
    }

    #[test]
    fn test_order_scaled_totals() {
        let result = calculate_costing(&sample_input());

        assert_eq!(result.total_warp_cost, dec("10738.00"));
        assert_eq!(result.total_weft_cost, dec("9640.00"));
        assert_eq!(result.total_production_cost, dec("20378.00"));
        assert_eq!(result.total_net_profit, dec("3057.00"));
    }

    #[test]
    fn test_per_line_breakdown_is_rounded() {
        let result = calculate_costing(&sample_input());

        assert_eq!(result.warp_lines.len(), 1);
        assert_eq!(result.weft_lines.len(), 1);
        assert_eq!(result.warp_lines[0].glm.to_string(), "0.4247");
        assert_eq!(result.weft_lines[0].cost_per_metre.to_string(), "96.40");
    }

    #[test]
    fn test_zero_input_identity() {
        let result = calculate_costing(&CostingInput::default());

        assert_eq!(result.production_cost_per_metre, Decimal::ZERO);
        assert_eq!(result.minimum_selling_price_per_metre, Decimal::ZERO);
        assert_eq!(result.profit_percent, Decimal::ZERO);
        assert_eq!(result.net_profit_per_metre, Decimal::ZERO);
        assert_eq!(result.total_production_cost, Decimal::ZERO);
        assert!(result.warp_lines.is_empty());
    }

    #[test]
    fn test_monogram_and_butta_add_exactly_one() {
        let base = calculate_costing(&sample_input());

        let mut input = sample_input();
        input.charges.monogram = true;
        input.charges.butta = true;
        let flagged = calculate_costing(&input);

        assert_eq!(
            flagged.production_cost_per_metre - base.production_cost_per_metre,
            dec("1.00")
        );
        assert_eq!(flagged.additional_charges, dec("1.00"));
        assert_eq!(flagged.warp_cost_per_metre, base.warp_cost_per_metre);
        assert_eq!(flagged.weft_cost_per_metre, base.weft_cost_per_metre);
        assert_eq!(flagged.job_rate_amount, base.job_rate_amount);
    }

    #[test]
    fn test_percentage_charges_layer_on_yarn_cost() {
        let mut input = sample_input();
        input.charges.job_rate_percent = dec("10");
        let result = calculate_costing(&input);

        // 10% of 203.7825... = 20.378...
        assert_eq!(result.job_rate_amount, dec("20.38"));
        // 203.7825... + 20.3782... = 224.1608...
        assert_eq!(result.production_cost_per_metre, dec("224.16"));
    }

    #[test]
    fn test_tiny_selling_price_counts_as_unset() {
        let mut input = sample_input();
        input.charges.selling_price = Some(dec("0.001"));
        let result = calculate_costing(&input);

        assert!(result.selling_price_defaulted);
        assert_eq!(result.selling_price_per_metre, result.minimum_selling_price_per_metre);
    }

    #[test]
    fn test_selling_below_cost_gives_negative_profit() {
        let mut input = sample_input();
        input.charges.selling_price = Some(dec("200"));
        let result = calculate_costing(&input);

        assert_eq!(result.net_profit_per_metre, dec("-3.78"));
        assert!(result.profit_percent < Decimal::ZERO);
    }

    #[test]
    fn test_repeat_evaluation_is_identical() {
        let input = sample_input();
        let first = calculate_costing(&input);
        let second = calculate_costing(&input);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    const REFERENCE_WARP: &str = r#"{"width": "150", "reedGap": "2", "reedCount": "60",
        "yarnCount": "40", "yarnRate": "250", "sizingRate": "1.2"}"#;

    fn from_form(payload: &str) -> CostingInput {
        CostingInput::from_json(payload).unwrap()
    }

    #[test]
    fn test_oversized_dimensions_clamp_to_maximum() {
        let input = from_form(
            r#"{"orderLength": "100", "warpLines": [{"width": "1e15", "reedGap": "2",
                "reedCount": "1e15", "yarnCount": "40", "yarnRate": "250", "sizingRate": "1.2"}]}"#,
        );
        let mut clamped = sample_input();
        clamped.weft_lines.clear();
        clamped.warp_lines[0].width = MAX_FIELD_VALUE;
        clamped.warp_lines[0].reed_count = MAX_FIELD_VALUE;

        assert_eq!(calculate_costing(&input), calculate_costing(&clamped));
    }

    #[test]
    fn test_vanishing_yarn_count_clamps_to_minimum() {
        let input = from_form(
            r#"{"orderLength": "100", "warpLines": [{"width": "150", "reedGap": "2",
                "reedCount": "60", "yarnCount": "1e-27", "yarnRate": "250", "sizingRate": "1.2"}]}"#,
        );
        let mut clamped = sample_input();
        clamped.weft_lines.clear();
        clamped.warp_lines[0].yarn_count = MIN_YARN_COUNT;

        let result = calculate_costing(&input);
        assert_eq!(result, calculate_costing(&clamped));
        assert!(result.production_cost_per_metre > Decimal::ZERO);
    }

    #[test]
    fn test_huge_order_length_clamps_to_maximum() {
        let input = from_form(&format!(
            r#"{{"orderLength": "1e27", "warpLines": [{}]}}"#,
            REFERENCE_WARP
        ));
        let result = calculate_costing(&input);

        assert_eq!(result.production_cost_per_metre, dec("107.38"));
        assert_eq!(
            result.total_production_cost,
            round_currency(dec("107.38") * MAX_FIELD_VALUE)
        );
    }

    #[test]
    fn test_order_totals_saturate_instead_of_overflowing() {
        let maxed = WarpLineSpec {
            width: MAX_FIELD_VALUE,
            reed_gap: MAX_FIELD_VALUE,
            reed_count: MAX_FIELD_VALUE,
            yarn_count: MIN_YARN_COUNT,
            yarn_rate: MAX_FIELD_VALUE,
            sizing_rate: MAX_FIELD_VALUE,
            ..Default::default()
        };
        let input = CostingInput {
            order_length: MAX_FIELD_VALUE,
            warp_lines: vec![maxed; 100],
            weft_lines: vec![],
            charges: ChargesConfig {
                job_rate_percent: MAX_FIELD_VALUE,
                expenses_percent: MAX_FIELD_VALUE,
                brokerage_percent: MAX_FIELD_VALUE,
                ..Default::default()
            },
        };

        let result = calculate_costing(&input);
        assert_eq!(result.total_production_cost, Decimal::MAX);
        assert!(result.minimum_selling_price_per_metre > result.production_cost_per_metre);
        assert!(result.net_profit_per_metre > Decimal::ZERO);
    }
}
