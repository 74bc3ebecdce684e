//! WebAssembly module for Rapier Loom Costing
//!
//! Provides client-side computation for:
//! - Live costing previews while the order form is edited
//! - Per-line warp and weft figures
//! - Input completeness checks
//!
//! Every function takes and returns JSON strings so that decimal figures
//! cross the boundary without passing through a float.

use rust_decimal::Decimal;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::costing::constants::{
    ENGLISH_COUNT_FACTOR, FIXED_CHARGE_PER_FLAG, MINIMUM_MARKUP_FACTOR, WASTAGE_FACTOR,
};
use shared::{
    calculate_costing, CostingError, ProductionCostAssembler, WarpLineCalculator,
    WeftLineCalculator,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js_error(err: CostingError) -> JsValue {
    let message = JsValue::from_str(&format!("Invalid costing payload: {}", err));
    web_sys::console::warn_1(&message);
    message
}

fn evaluate(input_json: &str) -> Result<String, CostingError> {
    let input = CostingInput::from_json(input_json)?;
    let result = calculate_costing(&input);
    Ok(serde_json::to_string(&result)?)
}

fn warp_line(line_json: &str, order_length: &str) -> Result<String, CostingError> {
    let spec: WarpLineSpec = serde_json::from_str(line_json)?;
    let line = WarpLineCalculator::calculate(&spec, form_decimal(order_length)).rounded();
    Ok(serde_json::to_string(&line)?)
}

fn weft_line(line_json: &str, order_length: &str) -> Result<String, CostingError> {
    let spec: WeftLineSpec = serde_json::from_str(line_json)?;
    let line = WeftLineCalculator::calculate(&spec, form_decimal(order_length)).rounded();
    Ok(serde_json::to_string(&line)?)
}

fn assess(input_json: &str) -> Result<String, CostingError> {
    let input = CostingInput::from_json(input_json)?;
    Ok(serde_json::to_string(&assess_input(&input))?)
}

/// Form fields arrive as text; apply the same lenient rules as the payload
fn form_decimal(raw: &str) -> Decimal {
    coerce_decimal(&Value::String(raw.to_string()))
}

/// Evaluate a full costing recipe, returning the result as JSON
#[wasm_bindgen]
pub fn preview_costing(input_json: &str) -> Result<String, JsValue> {
    evaluate(input_json).map_err(to_js_error)
}

/// Figures for a single warp line
#[wasm_bindgen]
pub fn preview_warp_line(line_json: &str, order_length: &str) -> Result<String, JsValue> {
    warp_line(line_json, order_length).map_err(to_js_error)
}

/// Figures for a single weft line
#[wasm_bindgen]
pub fn preview_weft_line(line_json: &str, order_length: &str) -> Result<String, JsValue> {
    weft_line(line_json, order_length).map_err(to_js_error)
}

/// Report missing fields without blocking the preview
#[wasm_bindgen]
pub fn assess_costing(input_json: &str) -> Result<String, JsValue> {
    assess(input_json).map_err(to_js_error)
}

/// Minimum selling price for a production cost typed into the form
#[wasm_bindgen]
pub fn minimum_selling_price(production_cost: &str) -> String {
    let cost = round_currency(form_decimal(production_cost));
    ProductionCostAssembler::minimum_selling_price(cost).to_string()
}

#[wasm_bindgen]
pub fn wastage_factor() -> String {
    WASTAGE_FACTOR.to_string()
}

#[wasm_bindgen]
pub fn english_count_factor() -> String {
    ENGLISH_COUNT_FACTOR.to_string()
}

#[wasm_bindgen]
pub fn fixed_charge_per_flag() -> String {
    FIXED_CHARGE_PER_FLAG.to_string()
}

#[wasm_bindgen]
pub fn minimum_markup_factor() -> String {
    MINIMUM_MARKUP_FACTOR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const ORDER: &str = r#"{
        "orderLength": "100",
        "warpLines": [{"width": "150", "reedGap": "2", "reedCount": "60",
                       "yarnCount": "40", "yarnRate": "250", "sizingRate": "1.2"}],
        "weftLines": [{"reedSpace": "150", "picksPerInch": "60", "insertionsPerPick": "1",
                       "yarnCount": "40", "yarnRate": "230"}]
    }"#;

    #[test]
    fn test_preview_costing() {
        let result: CostingResult = serde_json::from_str(&evaluate(ORDER).unwrap()).unwrap();
        assert_eq!(result.production_cost_per_metre, dec("203.78"));
        assert_eq!(result.minimum_selling_price_per_metre, dec("234.35"));
        assert_eq!(result.total_production_cost, dec("20378.00"));
    }

    #[test]
    fn test_preview_lines() {
        let warp = r#"{"width": "150", "reedGap": "2", "reedCount": "60",
                       "yarnCount": "40", "yarnRate": "250", "sizingRate": "1.2"}"#;
        let line: LineCosting = serde_json::from_str(&warp_line(warp, "100").unwrap()).unwrap();
        assert_eq!(line.glm, dec("0.4247"));
        assert_eq!(line.cost_per_metre, dec("107.38"));
        assert_eq!(line.yarn_required_kg, dec("0.0425"));

        let weft = r#"{"reedSpace": "150", "picksPerInch": "60", "insertionsPerPick": "1",
                       "yarnCount": "40", "yarnRate": "230"}"#;
        let line: LineCosting = serde_json::from_str(&weft_line(weft, "100").unwrap()).unwrap();
        assert_eq!(line.glm, dec("0.4191"));
        assert_eq!(line.cost_per_metre, dec("96.40"));
    }

    #[test]
    fn test_blank_order_length_costs_nothing() {
        let weft = r#"{"reedSpace": "150", "picksPerInch": "60", "insertionsPerPick": "1",
                       "yarnCount": "40", "yarnRate": "230"}"#;
        let line: LineCosting = serde_json::from_str(&weft_line(weft, "").unwrap()).unwrap();
        assert_eq!(line.yarn_required_kg, Decimal::ZERO);
        assert_eq!(line.cost_per_metre, dec("96.40"));
    }

    #[test]
    fn test_assess_costing() {
        let assessment: CostingAssessment = serde_json::from_str(&assess("{}").unwrap()).unwrap();
        assert_eq!(assessment.status, CostingStatus::Incomplete);

        let assessment: CostingAssessment = serde_json::from_str(&assess(ORDER).unwrap()).unwrap();
        assert!(assessment.is_complete());
    }

    #[test]
    fn test_malformed_payload_is_rejected() {
        assert!(matches!(evaluate("{oops"), Err(CostingError::InvalidPayload(_))));
    }

    #[test]
    fn test_minimum_selling_price() {
        assert_eq!(minimum_selling_price("203.78"), "234.35");
        assert_eq!(minimum_selling_price("abc"), "0.00");
    }

    #[test]
    fn test_constants() {
        assert_eq!(wastage_factor(), "1.10");
        assert_eq!(english_count_factor(), "590.5");
        assert_eq!(fixed_charge_per_flag(), "0.50");
        assert_eq!(minimum_markup_factor(), "1.15");
    }
}
