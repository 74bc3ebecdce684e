//! Order-level add-on charges

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{bounded, lenient};

/// Finishing flags, percentage charges and the optional caller price
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChargesConfig {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub monogram: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub butta: bool,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub job_rate_percent: Decimal,
    /// Overhead
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub expenses_percent: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub brokerage_percent: Decimal,
    /// `None` until the salesperson commits to a price
    #[serde(default, deserialize_with = "lenient::optional_price")]
    pub selling_price: Option<Decimal>,
}

impl ChargesConfig {
    pub fn sanitized(&self) -> Self {
        Self {
            monogram: self.monogram,
            butta: self.butta,
            job_rate_percent: bounded(self.job_rate_percent),
            expenses_percent: bounded(self.expenses_percent),
            brokerage_percent: bounded(self.brokerage_percent),
            selling_price: self
                .selling_price
                .filter(|price| *price > Decimal::ZERO)
                .map(bounded),
        }
    }

    /// Order-level flags set (monogram, butta)
    pub fn flag_count(&self) -> usize {
        usize::from(self.monogram) + usize::from(self.butta)
    }
}
