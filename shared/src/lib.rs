//! Shared costing engine for the rapier weaving mill ERP
//!
//! This crate is the single home of the fabric costing formulas. The backend
//! persistence path and the WASM preview both call into it, so a figure shown
//! in the browser is the figure stored with the order.

pub mod costing;
pub mod error;
pub mod models;
pub mod types;
pub mod validation;

pub use costing::*;
pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
