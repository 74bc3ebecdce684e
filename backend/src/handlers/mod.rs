//! HTTP handlers

pub mod costing;
pub mod health;

pub use costing::*;
pub use health::*;
