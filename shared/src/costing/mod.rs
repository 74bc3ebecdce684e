//! Rapier fabric costing engine
//!
//! Leaves first: the warp and weft calculators turn one yarn line into
//! per-metre figures, the charges aggregator layers add-ons onto the yarn
//! subtotal, and the assembler combines everything into a [`CostingResult`]
//! while owning the rounding policy. The recalculation rules decide when the
//! assembler has to run again.
//!
//! [`CostingResult`]: crate::models::CostingResult

mod assembler;
mod charges;
pub mod constants;
mod recalc;
mod warp;
mod weft;

pub use assembler::{calculate_costing, ProductionCostAssembler};
pub use charges::ChargesAggregator;
pub use recalc::{
    apply_record_changes, apply_record_update, create_record, is_stale, recalculate_record,
    replace_record_input, CostingChange, CostingDraft,
};
pub use warp::WarpLineCalculator;
pub use weft::WeftLineCalculator;
