//! Business logic services for the costing service

pub mod costing;

pub use costing::CostingService;
