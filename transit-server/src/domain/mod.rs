//! Domain types for the transit query server.
//!
//! This module contains the validated inputs (station names, stop ids,
//! limits) and the typed feed records the search layer works on. Inputs
//! enforce their invariants at construction time, so code that receives
//! them can trust their validity.

mod error;
pub mod labels;
mod query;
mod records;
mod station;
mod stop;

pub use error::QueryError;
pub use query::{DEFAULT_LIMIT, Limit, MAX_LIMIT, MIN_LIMIT, NameQuery, StopQuery};
pub use records::{BikeStation, BusArrival, Named, RailArrival, StopEntry, TrainPosition};
pub use station::{InvalidStationName, StationName};
pub use stop::{InvalidStopId, StopId};
