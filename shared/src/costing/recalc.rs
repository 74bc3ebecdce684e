//! Recalculation rules.
//!
//! A costing result is never patched. Any mutation of a field the engine
//! reads goes through one of the paths here, and each of them re-runs the
//! full evaluation before handing control back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calculate_costing;
use crate::error::{CostingError, LineSide};
use crate::types::lenient;
use crate::models::{
    ChargesConfig, CostingInput, CostingRecord, CostingResult, CreateCostingRecordInput,
    UpdateCostingRecordInput, WarpLineSpec, WeftLineSpec,
};

/// Every mutation that contributes to a costing result.
///
/// On the wire: `{"op": "addWarpLine", "value": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "camelCase")]
pub enum CostingChange {
    OrderLength(#[serde(deserialize_with = "lenient::decimal")] Decimal),
    AddWarpLine(WarpLineSpec),
    UpdateWarpLine { index: usize, line: WarpLineSpec },
    RemoveWarpLine(usize),
    AddWeftLine(WeftLineSpec),
    UpdateWeftLine { index: usize, line: WeftLineSpec },
    RemoveWeftLine(usize),
    Charges(ChargesConfig),
    /// `None` or a non-positive price clears the caller's choice
    SellingPrice(#[serde(deserialize_with = "lenient::optional_price")] Option<Decimal>),
    ReplaceAll(CostingInput),
}

impl CostingChange {
    /// Apply to an input in place, leaving it untouched on error
    pub fn apply_to(self, input: &mut CostingInput) -> Result<(), CostingError> {
        match self {
            CostingChange::OrderLength(length) => input.order_length = length,
            CostingChange::AddWarpLine(line) => input.warp_lines.push(line),
            CostingChange::UpdateWarpLine { index, line } => {
                let len = input.warp_lines.len();
                let slot = input
                    .warp_lines
                    .get_mut(index)
                    .ok_or(CostingError::LineOutOfRange { side: LineSide::Warp, index, len })?;
                *slot = line;
            }
            CostingChange::RemoveWarpLine(index) => {
                check_index(LineSide::Warp, index, input.warp_lines.len())?;
                input.warp_lines.remove(index);
            }
            CostingChange::AddWeftLine(line) => input.weft_lines.push(line),
            CostingChange::UpdateWeftLine { index, line } => {
                let len = input.weft_lines.len();
                let slot = input
                    .weft_lines
                    .get_mut(index)
                    .ok_or(CostingError::LineOutOfRange { side: LineSide::Weft, index, len })?;
                *slot = line;
            }
            CostingChange::RemoveWeftLine(index) => {
                check_index(LineSide::Weft, index, input.weft_lines.len())?;
                input.weft_lines.remove(index);
            }
            CostingChange::Charges(charges) => input.charges = charges,
            CostingChange::SellingPrice(price) => {
                input.charges.selling_price = price.filter(|p| *p > Decimal::ZERO)
            }
            CostingChange::ReplaceAll(replacement) => *input = replacement,
        }
        Ok(())
    }
}

fn check_index(side: LineSide, index: usize, len: usize) -> Result<(), CostingError> {
    if index < len {
        Ok(())
    } else {
        Err(CostingError::LineOutOfRange { side, index, len })
    }
}

/// An input paired with the result derived from it.
///
/// The input can only be changed through [`CostingDraft::apply`], which
/// recomputes before returning, so the result can never go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct CostingDraft {
    input: CostingInput,
    result: CostingResult,
}

impl CostingDraft {
    pub fn new(input: CostingInput) -> Self {
        let result = calculate_costing(&input);
        Self { input, result }
    }

    pub fn input(&self) -> &CostingInput {
        &self.input
    }

    pub fn result(&self) -> &CostingResult {
        &self.result
    }

    pub fn apply(&mut self, change: CostingChange) -> Result<&CostingResult, CostingError> {
        change.apply_to(&mut self.input)?;
        self.result = calculate_costing(&self.input);
        Ok(&self.result)
    }

    /// Apply a batch in order. All or nothing: a failing change leaves the
    /// draft exactly as it was.
    pub fn apply_all<I>(&mut self, changes: I) -> Result<&CostingResult, CostingError>
    where
        I: IntoIterator<Item = CostingChange>,
    {
        let mut input = self.input.clone();
        for change in changes {
            change.apply_to(&mut input)?;
        }
        self.result = calculate_costing(&input);
        self.input = input;
        Ok(&self.result)
    }

    pub fn into_parts(self) -> (CostingInput, CostingResult) {
        (self.input, self.result)
    }
}

/// True when `stored` no longer matches a fresh evaluation of `input`
pub fn is_stale(input: &CostingInput, stored: &CostingResult) -> bool {
    calculate_costing(input) != *stored
}

/// Build a brand-new record, evaluating its costing
pub fn create_record(input: CreateCostingRecordInput, now: DateTime<Utc>) -> CostingRecord {
    let result = calculate_costing(&input.costing);
    CostingRecord {
        id: Uuid::new_v4(),
        order_ref: input.order_ref,
        customer_name: input.customer_name,
        notes: input.notes,
        input: input.costing,
        result,
        revision: 1,
        created_at: now,
        updated_at: now,
    }
}

/// Merge an update into a record snapshot.
///
/// The costing is re-evaluated when the update touches a contributing field
/// or when the stored result has drifted from its own input. The returned
/// record is a full replacement for whatever is stored.
pub fn apply_record_update(
    record: &CostingRecord,
    update: UpdateCostingRecordInput,
    now: DateTime<Utc>,
) -> CostingRecord {
    let mut next = record.clone();
    let touches_costing = update.touches_costing();

    if let Some(order_ref) = update.order_ref {
        next.order_ref = order_ref;
    }
    if let Some(customer_name) = update.customer_name {
        next.customer_name = Some(customer_name);
    }
    if let Some(notes) = update.notes {
        next.notes = Some(notes);
    }
    if let Some(order_length) = update.order_length {
        next.input.order_length = order_length;
    }
    if let Some(warp_lines) = update.warp_lines {
        next.input.warp_lines = warp_lines;
    }
    if let Some(weft_lines) = update.weft_lines {
        next.input.weft_lines = weft_lines;
    }
    if let Some(charges) = update.charges {
        next.input.charges = charges;
    }

    if touches_costing || is_stale(&next.input, &next.result) {
        next.result = calculate_costing(&next.input);
    }
    next.revision = record.revision + 1;
    next.updated_at = now;
    next
}

/// Swap the whole costing input of a record and re-evaluate
pub fn replace_record_input(
    record: &CostingRecord,
    input: CostingInput,
    now: DateTime<Utc>,
) -> CostingRecord {
    let mut next = record.clone();
    next.result = calculate_costing(&input);
    next.input = input;
    next.revision = record.revision + 1;
    next.updated_at = now;
    next
}

/// Apply a batch of line-level edits to a record, all or nothing
pub fn apply_record_changes(
    record: &CostingRecord,
    changes: Vec<CostingChange>,
    now: DateTime<Utc>,
) -> Result<CostingRecord, CostingError> {
    let mut draft = CostingDraft::new(record.input.clone());
    draft.apply_all(changes)?;
    let (input, result) = draft.into_parts();

    let mut next = record.clone();
    next.input = input;
    next.result = result;
    next.revision = record.revision + 1;
    next.updated_at = now;
    Ok(next)
}

/// Re-evaluate a record from its stored input
pub fn recalculate_record(record: &CostingRecord, now: DateTime<Utc>) -> CostingRecord {
    replace_record_input(record, record.input.clone(), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn warp() -> WarpLineSpec {
        WarpLineSpec {
            width: dec("150"),
            reed_gap: dec("2"),
            reed_count: dec("60"),
            yarn_count: dec("40"),
            yarn_rate: dec("250"),
            sizing_rate: dec("1.2"),
            ..Default::default()
        }
    }

    fn weft() -> WeftLineSpec {
        WeftLineSpec {
            reed_space: dec("150"),
            picks_per_inch: dec("60"),
            insertions_per_pick: dec("1"),
            yarn_count: dec("40"),
            yarn_rate: dec("230"),
            weft_share_percent: dec("100"),
        }
    }

    fn record() -> CostingRecord {
        create_record(
            CreateCostingRecordInput {
                order_ref: "SO-1".to_string(),
                customer_name: None,
                notes: None,
                costing: CostingInput {
                    order_length: dec("100"),
                    warp_lines: vec![warp()],
                    weft_lines: vec![weft()],
                    charges: ChargesConfig::default(),
                },
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_draft_recomputes_on_every_change() {
        let mut draft = CostingDraft::new(CostingInput::default());
        assert_eq!(draft.result().production_cost_per_metre, Decimal::ZERO);

        draft.apply(CostingChange::AddWarpLine(warp())).unwrap();
        assert_eq!(draft.result().production_cost_per_metre, dec("107.38"));

        draft.apply(CostingChange::AddWeftLine(weft())).unwrap();
        assert_eq!(draft.result().production_cost_per_metre, dec("203.78"));

        draft.apply(CostingChange::SellingPrice(Some(dec("220")))).unwrap();
        assert_eq!(draft.result().net_profit_per_metre, dec("16.22"));

        draft.apply(CostingChange::RemoveWarpLine(0)).unwrap();
        assert_eq!(draft.result().production_cost_per_metre, dec("96.40"));

        assert!(!is_stale(draft.input(), draft.result()));
    }

    #[test]
    fn test_draft_rejects_bad_index_and_keeps_state() {
        let mut draft = CostingDraft::new(CostingInput {
            warp_lines: vec![warp()],
            ..Default::default()
        });
        let before = draft.clone();

        let err = draft
            .apply(CostingChange::UpdateWeftLine { index: 0, line: weft() })
            .unwrap_err();
        assert!(matches!(
            err,
            CostingError::LineOutOfRange { side: LineSide::Weft, index: 0, len: 0 }
        ));
        assert!(draft.apply(CostingChange::RemoveWarpLine(3)).is_err());
        assert!(draft
            .apply_all(vec![
                CostingChange::OrderLength(dec("500")),
                CostingChange::RemoveWeftLine(0),
            ])
            .is_err());
        assert_eq!(draft, before);
    }

    #[test]
    fn test_draft_apply_all_matches_fresh_evaluation() {
        let mut draft = CostingDraft::new(CostingInput::default());
        draft
            .apply_all(vec![
                CostingChange::OrderLength(dec("100")),
                CostingChange::AddWarpLine(warp()),
                CostingChange::AddWeftLine(weft()),
                CostingChange::UpdateWarpLine {
                    index: 0,
                    line: WarpLineSpec { has_bobin_charge: true, ..warp() },
                },
            ])
            .unwrap();

        let (input, result) = draft.into_parts();
        assert_eq!(result, calculate_costing(&input));
        assert_eq!(result.additional_charges, dec("0.50"));
    }

    #[test]
    fn test_clearing_selling_price() {
        let mut draft = CostingDraft::new(record().input);
        draft.apply(CostingChange::SellingPrice(Some(dec("220")))).unwrap();
        draft.apply(CostingChange::SellingPrice(Some(Decimal::ZERO))).unwrap();
        assert!(draft.result().selling_price_defaulted);
    }

    #[test]
    fn test_change_wire_format() {
        let changes: Vec<CostingChange> = serde_json::from_str(
            r#"[
                {"op": "orderLength", "value": "250"},
                {"op": "removeWeftLine", "value": 0},
                {"op": "updateWarpLine", "value": {"index": 1, "line": {"width": 150, "yarnCount": ""}}},
                {"op": "sellingPrice", "value": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(changes[0], CostingChange::OrderLength(dec("250")));
        assert_eq!(changes[1], CostingChange::RemoveWeftLine(0));
        assert_eq!(
            changes[2],
            CostingChange::UpdateWarpLine {
                index: 1,
                line: WarpLineSpec { width: dec("150"), ..Default::default() },
            }
        );
        assert_eq!(changes[3], CostingChange::SellingPrice(None));
    }

    #[test]
    fn test_change_values_follow_form_coercion() {
        let changes: Vec<CostingChange> = serde_json::from_str(
            r#"[
                {"op": "orderLength", "value": ""},
                {"op": "orderLength", "value": "-40"},
                {"op": "sellingPrice", "value": ""},
                {"op": "sellingPrice", "value": "0"},
                {"op": "sellingPrice", "value": 215.5}
            ]"#,
        )
        .unwrap();

        assert_eq!(changes[0], CostingChange::OrderLength(Decimal::ZERO));
        assert_eq!(changes[1], CostingChange::OrderLength(Decimal::ZERO));
        assert_eq!(changes[2], CostingChange::SellingPrice(None));
        assert_eq!(changes[3], CostingChange::SellingPrice(None));
        assert_eq!(changes[4], CostingChange::SellingPrice(Some(dec("215.5"))));

        let mut draft = CostingDraft::new(record().input);
        draft.apply_all(changes).unwrap();
        assert_eq!(draft.input().order_length, Decimal::ZERO);
        assert!(!draft.result().selling_price_defaulted);
    }

    #[test]
    fn test_stale_detection() {
        let record = record();
        assert!(!is_stale(&record.input, &record.result));

        let mut tampered = record.result.clone();
        tampered.production_cost_per_metre = dec("1.00");
        assert!(is_stale(&record.input, &tampered));
    }

    #[test]
    fn test_metadata_update_keeps_result() {
        let record = record();
        let updated = apply_record_update(
            &record,
            UpdateCostingRecordInput {
                notes: Some("dyed yarn".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(updated.result, record.result);
        assert_eq!(updated.notes.as_deref(), Some("dyed yarn"));
        assert_eq!(updated.revision, 2);
    }

    #[test]
    fn test_costing_update_recomputes() {
        let record = record();
        let updated = apply_record_update(
            &record,
            UpdateCostingRecordInput {
                order_length: Some(dec("200")),
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(updated.result.total_production_cost, dec("40756.00"));
        assert_eq!(updated.result, calculate_costing(&updated.input));
    }

    #[test]
    fn test_metadata_update_heals_stale_result() {
        let mut record = record();
        record.result.production_cost_per_metre = dec("1.00");

        let updated = apply_record_update(
            &record,
            UpdateCostingRecordInput {
                order_ref: Some("SO-2".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(updated.result.production_cost_per_metre, dec("203.78"));
    }

    #[test]
    fn test_record_changes() {
        let record = record();
        let updated = apply_record_changes(
            &record,
            vec![
                CostingChange::AddWeftLine(WeftLineSpec {
                    weft_share_percent: dec("0"),
                    ..weft()
                }),
                CostingChange::Charges(ChargesConfig {
                    monogram: true,
                    ..Default::default()
                }),
            ],
            Utc::now(),
        )
        .unwrap();

        assert_eq!(updated.input.weft_lines.len(), 2);
        // Second weft line adds cost per metre but no yarn share
        assert_eq!(updated.result.weft_cost_per_metre, dec("192.80"));
        assert_eq!(updated.result.weft_yarn_required_kg, dec("0.0419"));
        assert_eq!(updated.result.additional_charges, dec("0.50"));
        assert_eq!(updated.revision, 2);

        let err = apply_record_changes(&record, vec![CostingChange::RemoveWarpLine(9)], Utc::now());
        assert!(err.is_err());
    }

    #[test]
    fn test_replace_and_recalculate() {
        let record = record();
        let replaced = replace_record_input(&record, CostingInput::default(), Utc::now());
        assert_eq!(replaced.result, calculate_costing(&CostingInput::default()));
        assert_eq!(replaced.revision, 2);

        let recalculated = recalculate_record(&replaced, Utc::now());
        assert_eq!(recalculated.result, replaced.result);
        assert_eq!(recalculated.revision, 3);
    }
}
