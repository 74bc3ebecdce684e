//! Costing record models owned by the order-storage layer

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{ChargesConfig, CostingInput, CostingResult, WarpLineSpec, WeftLineSpec};
use crate::types::lenient;

/// A persisted costing: the raw recipe plus the snapshot derived from it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostingRecord {
    pub id: Uuid,
    /// Sales order reference, e.g. "SO-2024-0117"
    pub order_ref: String,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub input: CostingInput,
    pub result: CostingResult,
    /// Bumped on every write; informational only, never used to reject writes
    pub revision: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a costing record
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCostingRecordInput {
    #[validate(length(min = 1, max = 64))]
    pub order_ref: String,
    #[validate(length(max = 128))]
    pub customer_name: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[serde(default)]
    pub costing: CostingInput,
}

/// Partial update of a costing record. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCostingRecordInput {
    #[validate(length(min = 1, max = 64))]
    pub order_ref: Option<String>,
    #[validate(length(max = 128))]
    pub customer_name: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub order_length: Option<Decimal>,
    pub warp_lines: Option<Vec<WarpLineSpec>>,
    pub weft_lines: Option<Vec<WeftLineSpec>>,
    pub charges: Option<ChargesConfig>,
}

impl UpdateCostingRecordInput {
    /// Whether this update carries any field the engine reads
    pub fn touches_costing(&self) -> bool {
        self.order_length.is_some()
            || self.warp_lines.is_some()
            || self.weft_lines.is_some()
            || self.charges.is_some()
    }
}

/// Query parameters for listing records
#[derive(Debug, Clone, Deserialize)]
pub struct ListCostingRecordsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListCostingRecordsQuery {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 200;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}
