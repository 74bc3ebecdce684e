//! Input assessment for costing recipes
//!
//! The engine always produces a best-effort number from whatever it is
//! given. This module is the separate, non-blocking check that tells the
//! caller whether that number came from a fully specified recipe.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costing::constants::{MAX_FIELD_VALUE, MIN_YARN_COUNT, PERCENT};
use crate::types::saturating_sum;
use crate::models::{CostingInput, WarpLineSpec, WeftLineSpec};

// ============================================================================
// Field Validations
// ============================================================================

/// Validate a percentage charge is within 0-100
pub fn validate_percentage(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO || value > PERCENT {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate weft shares across all weft lines sum to 100
pub fn validate_weft_shares(lines: &[WeftLineSpec]) -> Result<(), &'static str> {
    for line in lines {
        if line.weft_share_percent < Decimal::ZERO {
            return Err("Weft share cannot be negative");
        }
    }
    let total = saturating_sum(lines.iter().map(|l| l.weft_share_percent));
    if total != PERCENT {
        return Err("Weft shares must sum to 100%");
    }
    Ok(())
}

/// Validate a yarn count can be used as a divisor
pub fn validate_yarn_count(count: Decimal) -> Result<(), &'static str> {
    if count <= Decimal::ZERO {
        return Err("Yarn count must be greater than zero");
    }
    Ok(())
}

// ============================================================================
// Recipe Assessment
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CostingStatus {
    Complete,
    /// Figures are best-effort; at least one contributing field is missing
    Incomplete,
}

/// One missing or suspicious field, addressed by its payload path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InputIssue {
    /// e.g. `warpLines[0].yarnCount`
    pub field: String,
    pub message: String,
}

impl InputIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CostingAssessment {
    pub status: CostingStatus,
    pub issues: Vec<InputIssue>,
}

impl CostingAssessment {
    pub fn is_complete(&self) -> bool {
        self.status == CostingStatus::Complete
    }
}

/// Report what is missing from a recipe without blocking evaluation
pub fn assess_input(input: &CostingInput) -> CostingAssessment {
    let raw = input;
    let input = raw.sanitized();
    let mut issues = Vec::new();

    if input.order_length.is_zero() {
        issues.push(InputIssue::new("orderLength", "Order length is not set"));
    }

    if input.warp_lines.is_empty() {
        issues.push(InputIssue::new("warpLines", "No warp yarn specified"));
    }
    for (index, line) in input.warp_lines.iter().enumerate() {
        assess_warp_line(index, line, &mut issues);
    }

    if input.weft_lines.is_empty() {
        issues.push(InputIssue::new("weftLines", "No weft yarn specified"));
    } else if let Err(msg) = validate_weft_shares(&input.weft_lines) {
        issues.push(InputIssue::new("weftLines", msg));
    }
    for (index, line) in input.weft_lines.iter().enumerate() {
        assess_weft_line(index, line, &mut issues);
    }

    let percentages = [
        ("charges.jobRatePercent", input.charges.job_rate_percent),
        ("charges.expensesPercent", input.charges.expenses_percent),
        ("charges.brokeragePercent", input.charges.brokerage_percent),
    ];
    for (field, value) in percentages {
        if let Err(msg) = validate_percentage(value) {
            issues.push(InputIssue::new(field, msg));
        }
    }

    assess_ranges(raw, &mut issues);

    let status = if issues.is_empty() {
        CostingStatus::Complete
    } else {
        CostingStatus::Incomplete
    };
    CostingAssessment { status, issues }
}

/// Validate a field lies within the range the formulas accept
pub fn validate_field_range(value: Decimal) -> Result<(), String> {
    if value > MAX_FIELD_VALUE {
        return Err(format!("Value exceeds the supported maximum of {}", MAX_FIELD_VALUE));
    }
    Ok(())
}

/// Out-of-range values are clamped before evaluation; say so
fn assess_ranges(input: &CostingInput, issues: &mut Vec<InputIssue>) {
    let mut check = |field: String, value: Decimal| {
        if let Err(msg) = validate_field_range(value) {
            issues.push(InputIssue::new(field, msg));
        } else if field.ends_with(".yarnCount") && value > Decimal::ZERO && value < MIN_YARN_COUNT {
            issues.push(InputIssue::new(
                field,
                format!("Yarn count is below the supported minimum of {}", MIN_YARN_COUNT),
            ));
        }
    };

    check("orderLength".to_string(), input.order_length);
    for (index, line) in input.warp_lines.iter().enumerate() {
        for (name, value) in line.numeric_fields() {
            check(format!("warpLines[{}].{}", index, name), value);
        }
    }
    for (index, line) in input.weft_lines.iter().enumerate() {
        for (name, value) in line.numeric_fields() {
            check(format!("weftLines[{}].{}", index, name), value);
        }
    }
    let charges = &input.charges;
    check("charges.jobRatePercent".to_string(), charges.job_rate_percent);
    check("charges.expensesPercent".to_string(), charges.expenses_percent);
    check("charges.brokeragePercent".to_string(), charges.brokerage_percent);
    if let Some(price) = charges.selling_price {
        check("charges.sellingPrice".to_string(), price);
    }
}

fn assess_warp_line(index: usize, line: &WarpLineSpec, issues: &mut Vec<InputIssue>) {
    let prefix = format!("warpLines[{}]", index);
    if line.width.is_zero() {
        issues.push(InputIssue::new(format!("{}.width", prefix), "Width is not set"));
    }
    if line.reed_count.is_zero() {
        issues.push(InputIssue::new(format!("{}.reedCount", prefix), "Reed count is not set"));
    }
    if let Err(msg) = validate_yarn_count(line.yarn_count) {
        issues.push(InputIssue::new(format!("{}.yarnCount", prefix), msg));
    }
    if line.yarn_rate.is_zero() {
        issues.push(InputIssue::new(format!("{}.yarnRate", prefix), "Yarn rate is not set"));
    }
}

fn assess_weft_line(index: usize, line: &WeftLineSpec, issues: &mut Vec<InputIssue>) {
    let prefix = format!("weftLines[{}]", index);
    if line.reed_space.is_zero() {
        issues.push(InputIssue::new(format!("{}.reedSpace", prefix), "Reed space is not set"));
    }
    if line.picks_per_inch.is_zero() {
        issues.push(InputIssue::new(
            format!("{}.picksPerInch", prefix),
            "Picks per inch is not set",
        ));
    }
    if line.insertions_per_pick.is_zero() {
        issues.push(InputIssue::new(
            format!("{}.insertionsPerPick", prefix),
            "Insertions per pick is not set",
        ));
    }
    if let Err(msg) = validate_yarn_count(line.yarn_count) {
        issues.push(InputIssue::new(format!("{}.yarnCount", prefix), msg));
    }
    if line.yarn_rate.is_zero() {
        issues.push(InputIssue::new(format!("{}.yarnRate", prefix), "Yarn rate is not set"));
    }
}
