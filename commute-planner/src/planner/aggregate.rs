//! Next-departure aggregation with windowed fallback.
//!
//! A single "leave now" query with alternatives is tried first. When it
//! yields nothing usable (no routes, or only departures that have already
//! gone) the aggregator samples a few single-route queries at fixed offsets
//! into the future, then merges, deduplicates and orders what came back.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::directions::{DepartAt, RouteQueryError, RouteSource};
use crate::domain::{Clock, Itinerary, LocationCandidate};

use super::config::PlannerConfig;
use super::rank::{deduplicate, drop_stale, sort_by_departure};

/// Where the aggregator is in its query sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackState {
    /// The "leave now" query with alternatives.
    Primary,
    /// Fallback attempt `i` (index into the offset list).
    Fallback(usize),
    /// No more queries.
    Done,
}

/// Aggregates transit departures from a route source.
pub struct RouteAggregator<R, C> {
    source: R,
    clock: C,
    config: PlannerConfig,
}

impl<R: RouteSource, C: Clock> RouteAggregator<R, C> {
    pub fn new(source: R, clock: C, config: PlannerConfig) -> Self {
        Self {
            source,
            clock,
            config,
        }
    }

    /// Fetch upcoming departures from `origin` to `destination`.
    ///
    /// Returns itineraries sorted by departure time, earliest first. An
    /// empty list is a successful answer: every query was tried and none
    /// produced a usable route. Only a provider failure on the primary
    /// query is an error; fallback failures are logged and skipped.
    ///
    /// Every configured fallback offset is queried regardless of
    /// `lookahead_hours`, which is only recorded for diagnostics.
    pub async fn get_next_departures(
        &self,
        origin: &LocationCandidate,
        destination: &LocationCandidate,
        lookahead_hours: i64,
    ) -> Result<Vec<Itinerary>, RouteQueryError> {
        let now = self.clock.now();
        let offsets = self.config.fallback_offsets();
        debug!(lookahead_hours, "querying departures");
        let mut collected: Vec<Itinerary> = Vec::new();
        let mut state = FallbackState::Primary;

        loop {
            state = match state {
                FallbackState::Primary => {
                    let fresh = self.primary(origin, destination, now).await?;
                    if fresh.is_empty() {
                        info!("no current departures, sampling later times");
                        FallbackState::Fallback(0)
                    } else {
                        return Ok(sort_by_departure(fresh));
                    }
                }
                FallbackState::Fallback(i) => match offsets.get(i) {
                    Some(offset) => {
                        let depart_at = DepartAt::At(now + *offset);
                        if let Some(itinerary) =
                            self.fallback(origin, destination, depart_at).await
                        {
                            collected.push(itinerary);
                        }
                        FallbackState::Fallback(i + 1)
                    }
                    None => FallbackState::Done,
                },
                FallbackState::Done => break,
            };
        }

        let merged = sort_by_departure(deduplicate(collected));
        debug!(departures = merged.len(), "fallback complete");
        Ok(merged)
    }

    /// The primary query, with stale departures removed.
    ///
    /// `NoRoutesFound` is treated as an empty answer so that it leads into
    /// fallback rather than failing the request.
    async fn primary(
        &self,
        origin: &LocationCandidate,
        destination: &LocationCandidate,
        now: DateTime<Utc>,
    ) -> Result<Vec<Itinerary>, RouteQueryError> {
        let itineraries = match self
            .source
            .query_transit_routes(origin, destination, DepartAt::Now, true)
            .await
        {
            Ok(itineraries) => itineraries,
            Err(RouteQueryError::NoRoutesFound) => Vec::new(),
            Err(e) => return Err(e),
        };

        let returned = itineraries.len();
        let fresh = drop_stale(itineraries, now, self.config.stale_tolerance());
        debug!(returned, fresh = fresh.len(), "primary query");
        Ok(fresh)
    }

    /// One fallback attempt; only the first route is used.
    async fn fallback(
        &self,
        origin: &LocationCandidate,
        destination: &LocationCandidate,
        depart_at: DepartAt,
    ) -> Option<Itinerary> {
        match self
            .source
            .query_transit_routes(origin, destination, depart_at, false)
            .await
        {
            Ok(itineraries) => {
                let first = itineraries.into_iter().next();
                if first.is_none() {
                    debug!(depart_at = %depart_at.as_param(), "fallback query returned nothing");
                }
                first
            }
            Err(RouteQueryError::NoRoutesFound) => {
                debug!(depart_at = %depart_at.as_param(), "fallback query found no routes");
                None
            }
            Err(e) => {
                warn!(depart_at = %depart_at.as_param(), error = %e, "fallback query failed");
                None
            }
        }
    }
}

impl<R, C> std::fmt::Debug for RouteAggregator<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteAggregator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
