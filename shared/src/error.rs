//! Errors raised at the edges of the costing engine.
//!
//! The formulas themselves cannot fail; these cover malformed payloads and
//! edits addressed to lines that do not exist.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CostingError {
    #[error("Invalid costing payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("{side} line {index} does not exist (order has {len})")]
    LineOutOfRange {
        side: LineSide,
        index: usize,
        len: usize,
    },
}

/// Which yarn set a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSide {
    Warp,
    Weft,
}

impl std::fmt::Display for LineSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineSide::Warp => write!(f, "Warp"),
            LineSide::Weft => write!(f, "Weft"),
        }
    }
}
