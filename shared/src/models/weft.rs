//! Weft yarn line specification

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costing::constants::FULL_WEFT_SHARE;
use crate::types::{bounded, bounded_yarn_count, lenient};

/// One weft yarn used in the fabric
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeftLineSpec {
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub reed_space: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub picks_per_inch: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub insertions_per_pick: Decimal,
    /// English count
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub yarn_count: Decimal,
    /// Currency per kg
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub yarn_rate: Decimal,
    /// This line's share of total weft insertions, 0-100
    #[serde(default = "full_weft_share", deserialize_with = "lenient::share_percent")]
    pub weft_share_percent: Decimal,
}

fn full_weft_share() -> Decimal {
    FULL_WEFT_SHARE
}

impl Default for WeftLineSpec {
    fn default() -> Self {
        Self {
            reed_space: Decimal::ZERO,
            picks_per_inch: Decimal::ZERO,
            insertions_per_pick: Decimal::ZERO,
            yarn_count: Decimal::ZERO,
            yarn_rate: Decimal::ZERO,
            weft_share_percent: FULL_WEFT_SHARE,
        }
    }
}

impl WeftLineSpec {
    /// Copy with every numeric field clamped into the supported domain
    pub fn sanitized(&self) -> Self {
        Self {
            reed_space: bounded(self.reed_space),
            picks_per_inch: bounded(self.picks_per_inch),
            insertions_per_pick: bounded(self.insertions_per_pick),
            yarn_count: bounded_yarn_count(self.yarn_count),
            yarn_rate: bounded(self.yarn_rate),
            weft_share_percent: bounded(self.weft_share_percent),
        }
    }

    /// Numeric fields keyed by payload name
    pub fn numeric_fields(&self) -> [(&'static str, Decimal); 6] {
        [
            ("reedSpace", self.reed_space),
            ("picksPerInch", self.picks_per_inch),
            ("insertionsPerPick", self.insertions_per_pick),
            ("yarnCount", self.yarn_count),
            ("yarnRate", self.yarn_rate),
            ("weftSharePercent", self.weft_share_percent),
        ]
    }
}
