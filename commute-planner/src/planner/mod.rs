//! Next-departure planning.
//!
//! This module answers "when can I next leave, and on what?" for a
//! transit trip. It asks a route source for departures, drops ones that
//! have already gone, and falls back to sampling future departure times
//! when the immediate answer is empty.

mod aggregate;
mod config;
mod rank;

pub use aggregate::{FallbackState, RouteAggregator};
pub use config::PlannerConfig;
pub use rank::{deduplicate, drop_stale, sort_by_departure};
