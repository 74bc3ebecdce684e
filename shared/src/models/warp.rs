//! Warp yarn line specification

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{bounded, bounded_yarn_count, lenient};

/// One warp yarn used in the fabric
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WarpLineSpec {
    /// Reed space in cm
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub width: Decimal,
    /// Extra space allowance in cm
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub reed_gap: Decimal,
    /// Ends-setting density
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub reed_count: Decimal,
    /// English count
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub yarn_count: Decimal,
    /// Currency per kg
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub yarn_rate: Decimal,
    /// Flat currency per metre addback
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub sizing_rate: Decimal,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_top_beam_charge: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub has_bobin_charge: bool,
}

impl WarpLineSpec {
    /// Copy with every numeric field clamped into the supported domain
    pub fn sanitized(&self) -> Self {
        Self {
            width: bounded(self.width),
            reed_gap: bounded(self.reed_gap),
            reed_count: bounded(self.reed_count),
            yarn_count: bounded_yarn_count(self.yarn_count),
            yarn_rate: bounded(self.yarn_rate),
            sizing_rate: bounded(self.sizing_rate),
            ..self.clone()
        }
    }

    /// Numeric fields keyed by payload name
    pub fn numeric_fields(&self) -> [(&'static str, Decimal); 6] {
        [
            ("width", self.width),
            ("reedGap", self.reed_gap),
            ("reedCount", self.reed_count),
            ("yarnCount", self.yarn_count),
            ("yarnRate", self.yarn_rate),
            ("sizingRate", self.sizing_rate),
        ]
    }

    /// Number of fixed-charge flags this line triggers (0, 1 or 2)
    pub fn flag_count(&self) -> usize {
        usize::from(self.has_top_beam_charge) + usize::from(self.has_bobin_charge)
    }
}
