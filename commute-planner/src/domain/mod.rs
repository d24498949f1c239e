//! Domain types for the commute planner.
//!
//! Itineraries and locations enforce their invariants at construction
//! time, so code that receives them can trust their validity.

mod error;
mod itinerary;
mod location;
mod time;

pub use error::DomainError;
pub use itinerary::{Itinerary, Step, TravelMode};
pub use location::{Coordinate, InvalidLocation, LocationCandidate};
pub use time::{Clock, FixedClock, SystemClock};
