//! Domain models for the rapier fabric costing engine

mod charges;
mod costing;
mod record;
mod warp;
mod weft;

pub use charges::*;
pub use costing::*;
pub use record::*;
pub use warp::*;
pub use weft::*;
